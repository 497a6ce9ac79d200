//! Security-related header handling.
//!
//! # Design Decisions
//! - CORS is applied uniformly by middleware; tile responses additionally
//!   carry the route's exposed origin
//! - Hop-by-hop headers never cross the gateway

pub mod headers;

pub use headers::{cors_layer, strip_hop_by_hop};
