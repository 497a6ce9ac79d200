//! XYZ map-tile gateway library.
//!
//! Validates `/tiles/{z}/{x}/{y}.{ext}` requests against the tile pyramid,
//! rewrites them to the upstream renderer's path convention and relays the
//! response with cache and CORS headers.

// Core domain (pure)
pub mod error;
pub mod routing;
pub mod tile;

// Transport
pub mod http;
pub mod upstream;

// Cross-cutting concerns
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteDecision, TileRouter};
pub use tile::{validate, TileCoordinate, TileFormat};
