//! Tile pyramid domain types.
//!
//! # Data Flow
//! ```text
//! "/tiles/5/10/10.pbf"
//!     → format.rs (extension → TileFormat)
//!     → coord.rs  ("5","10","10" → TileCoordinate, or GatewayError)
//!     → routing   (TileCoordinate + TileFormat → RouteDecision)
//! ```
//!
//! # Design Decisions
//! - Everything here is pure: no I/O, no shared state
//! - A `TileCoordinate` can only exist after validation

pub mod coord;
pub mod format;

pub use coord::{validate, CoordinateValidator, TileCoordinate, DEFAULT_MAX_ZOOM, MAX_SUPPORTED_ZOOM};
pub use format::{TileFormat, SUPPORTED_EXTENSIONS};
