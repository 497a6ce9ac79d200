//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (assign/propagate request ID)
//!     → server.rs (Axum routes, tile handler)
//!     → [routing: match + validate + route]
//!     → [upstream: forward once]
//!     → response.rs (relay with route headers, or translate GatewayError)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
