//! Active upstream health checking.
//!
//! # Responsibilities
//! - Periodically probe the upstream renderer
//! - Update upstream health state based on results

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::health::state::UpstreamHealth;
use crate::observability::metrics;
use crate::upstream::UpstreamClient;

pub struct HealthMonitor {
    upstream: UpstreamClient,
    health: Arc<UpstreamHealth>,
    config: HealthCheckConfig,
}

impl HealthMonitor {
    pub fn new(upstream: UpstreamClient, health: Arc<UpstreamHealth>, config: HealthCheckConfig) -> Self {
        Self {
            upstream,
            health,
            config,
        }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Active health checks disabled");
            return;
        }

        tracing::info!(
            interval = self.config.interval_secs,
            upstream = %self.upstream.base_url(),
            path = %self.config.path,
            "Health monitor starting"
        );

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check_once().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Probe the upstream once and record the outcome. Returns the probe result.
    pub async fn check_once(&self) -> bool {
        let timeout = Duration::from_secs(self.config.timeout_secs);

        let healthy = match self.upstream.probe(&self.config.path, timeout).await {
            Ok(status) if status.is_success() => true,
            Ok(status) => {
                tracing::warn!(status = %status, "Upstream health check failed: non-success status");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upstream health check failed");
                false
            }
        };

        let changed = if healthy {
            self.health.mark_success(self.config.healthy_threshold as usize)
        } else {
            self.health.mark_failure(self.config.unhealthy_threshold as usize)
        };
        if changed {
            tracing::info!(state = ?self.health.state(), "Upstream health changed");
        }

        metrics::record_upstream_health(self.health.is_healthy());
        healthy
    }
}
