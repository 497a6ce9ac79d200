//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tile_gateway_requests_total` (counter): tile requests by format, status
//! - `tile_gateway_request_duration_seconds` (histogram): latency by format
//! - `tile_gateway_rejections_total` (counter): client errors by reason
//! - `tile_gateway_upstream_errors_total` (counter): failed upstream fetches
//! - `tile_gateway_upstream_up` (gauge): 1=healthy, 0=unhealthy

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed tile request.
pub fn record_request(format: &'static str, status: u16, start_time: Instant) {
    ::metrics::counter!(
        "tile_gateway_requests_total",
        "format" => format,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("tile_gateway_request_duration_seconds", "format" => format)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a request rejected before reaching upstream.
pub fn record_rejection(reason: &'static str) {
    ::metrics::counter!("tile_gateway_rejections_total", "reason" => reason).increment(1);
}

pub fn record_upstream_error() {
    ::metrics::counter!("tile_gateway_upstream_errors_total").increment(1);
}

pub fn record_upstream_health(healthy: bool) {
    ::metrics::gauge!("tile_gateway_upstream_up").set(if healthy { 1.0 } else { 0.0 });
}
