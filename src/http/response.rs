//! Response construction and error translation.
//!
//! # Responsibilities
//! - Translate `GatewayError` into status + JSON body
//! - Relay upstream responses with the route's cache and CORS headers
//! - Build the generic 404 and 500 bodies
//!
//! # Design Decisions
//! - Relayed bodies are complete: the upstream client has already read them
//! - Hop-by-hop headers stripped automatically
//! - Upstream failure details are logged, never sent to the client

use std::any::Any;

use axum::{
    body::Body,
    body::Bytes,
    http::{header, HeaderValue, Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::error::GatewayError;
use crate::routing::RouteDecision;
use crate::security::strip_hop_by_hop;
use crate::tile::SUPPORTED_EXTENSIONS;

/// JSON body for a gateway error.
pub fn error_body(err: &GatewayError) -> Value {
    match err {
        GatewayError::InvalidCoordinateSyntax { field, value } => json!({
            "error": "Invalid tile coordinates",
            "field": field.as_str(),
            "value": value,
        }),
        GatewayError::ZoomOutOfRange { zoom, max_zoom } => json!({
            "error": format!("Zoom level must be between 0 and {}", max_zoom),
            "zoom": zoom,
            "max_zoom": max_zoom,
        }),
        GatewayError::CoordinateOutOfRangeForZoom {
            field,
            value,
            zoom,
            max_tile,
        } => json!({
            "error": "Tile coordinates out of range for zoom level",
            "axis": field.as_str(),
            "value": value,
            "zoom": zoom,
            "max_tile": max_tile,
        }),
        GatewayError::UnsupportedFormat { extension } => json!({
            "error": "Unsupported tile format",
            "format": extension,
            "supported": SUPPORTED_EXTENSIONS,
        }),
        GatewayError::UpstreamUnavailable { .. } => json!({
            "error": "Bad Gateway",
            "message": "Failed to fetch tile from upstream server",
        }),
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(error_body(&self))).into_response()
    }
}

/// 404 for paths no route matches.
pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "path": path })),
    )
        .into_response()
}

/// 500 body used when a handler panics.
pub fn internal_error(panic: Box<dyn Any + Send + 'static>) -> HttpResponse<Body> {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// Turn an upstream response into the client response.
///
/// Status and end-to-end headers pass through; `Cache-Control` and
/// `Access-Control-Allow-Origin` are replaced with the route's policy
/// whatever the upstream status.
pub fn relay(upstream: HttpResponse<Bytes>, decision: &RouteDecision) -> Response {
    let (mut parts, body) = upstream.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    apply_route_headers(&mut parts.headers, decision);
    Response::from_parts(parts, Body::from(body))
}

/// Write the route's cache and CORS policy into `headers`.
pub fn apply_route_headers(headers: &mut axum::http::HeaderMap, decision: &RouteDecision) {
    match HeaderValue::from_str(&decision.cache_control) {
        Ok(v) => {
            headers.insert(header::CACHE_CONTROL, v);
        }
        Err(e) => tracing::warn!(value = %decision.cache_control, error = %e, "Invalid Cache-Control value"),
    }
    match HeaderValue::from_str(&decision.exposed_origin) {
        Ok(v) => {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, v);
        }
        Err(e) => tracing::warn!(value = %decision.exposed_origin, error = %e, "Invalid CORS origin value"),
    }
}
