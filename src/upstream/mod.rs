//! Upstream renderer access.
//!
//! # Data Flow
//! ```text
//! RouteDecision.upstream_path
//!     → client.rs (base URL + path, forwarded headers, timeout)
//!     → upstream response head, or GatewayError::UpstreamUnavailable
//! ```
//!
//! # Design Decisions
//! - One attempt per inbound request; no retries
//! - Upstream HTTP statuses are relayed, not interpreted
//! - Client disconnect drops the handler future and aborts the fetch

pub mod client;

pub use client::UpstreamClient;
