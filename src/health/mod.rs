//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness (GET /healthz):
//!     Always 200 while the process serves requests
//!
//! Active upstream probe (active.rs, optional):
//!     Periodic timer
//!     → GET <upstream><health_check.path>
//!     → Update state.rs
//!     → tile_gateway_upstream_up gauge
//! ```
//!
//! # Design Decisions
//! - Liveness never depends on the upstream; orchestrators should not
//!   restart the gateway because the renderer is down
//! - Probe results are observational only: tile requests are forwarded
//!   regardless of upstream state

pub mod active;
pub mod state;

use serde::Serialize;

pub use active::HealthMonitor;
pub use state::{HealthState, UpstreamHealth};

/// Body of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
}

impl HealthStatus {
    pub fn ok(service: impl Into<String>) -> Self {
        Self {
            status: "ok",
            service: service.into(),
        }
    }
}
