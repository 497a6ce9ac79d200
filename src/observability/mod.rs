//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!     → spans.rs   (per-request spans carrying the request ID)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows into every request span
//! - Metrics are cheap (atomic increments); recording without an installed
//!   recorder is a no-op, so tests need no setup

pub mod logging;
pub mod metrics;
pub mod spans;
