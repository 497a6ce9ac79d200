//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! GET /tiles/{z}/{x}/{y}.{ext}
//!     → matcher.rs (extension → format, segments → validated coordinate)
//!     → router.rs  (coordinate + format → RouteDecision)
//!     → HTTP layer forwards RouteDecision.upstream_path
//! ```
//!
//! # Design Decisions
//! - Matcher and router are built once at startup, immutable at runtime
//! - Deterministic: same input always yields the same decision
//! - No HTTP types cross into this module

pub mod matcher;
pub mod router;

pub use matcher::{TileMatcher, TileRequest, TILES_PREFIX};
pub use router::{RouteDecision, TileRouter};
