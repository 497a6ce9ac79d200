//! Upstream path routing.
//!
//! # Responsibilities
//! - Map a validated tile request to the renderer's path convention
//! - Attach the configured cache and CORS policy
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Infallible: `TileFormat` is closed, so every variant has a template
//! - Returns data only; applying headers is the HTTP layer's job

use serde::Serialize;

use crate::config::GatewayConfig;
use crate::tile::{TileCoordinate, TileFormat};

/// Where to fetch a tile and how to label the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub upstream_path: String,
    pub cache_control: String,
    pub exposed_origin: String,
}

/// Computes `RouteDecision`s from configuration constants.
#[derive(Debug, Clone)]
pub struct TileRouter {
    vector_source: String,
    raster_style: String,
    cache_control: String,
    exposed_origin: String,
}

impl TileRouter {
    pub fn new(
        vector_source: impl Into<String>,
        raster_style: impl Into<String>,
        cache_ttl_secs: u64,
        exposed_origin: impl Into<String>,
    ) -> Self {
        Self {
            vector_source: vector_source.into(),
            raster_style: raster_style.into(),
            cache_control: format!("public, max-age={}", cache_ttl_secs),
            exposed_origin: exposed_origin.into(),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.tiles.vector_source.clone(),
            config.tiles.raster_style.clone(),
            config.cache.ttl_secs,
            config.cors.allowed_origin.clone(),
        )
    }

    pub fn route(&self, coord: &TileCoordinate, format: TileFormat) -> RouteDecision {
        let upstream_path = match format {
            TileFormat::Vector => format!(
                "/data/{}/{}/{}/{}.pbf",
                self.vector_source,
                coord.zoom(),
                coord.column(),
                coord.row()
            ),
            TileFormat::RasterPng | TileFormat::RasterJpg | TileFormat::RasterJpeg => format!(
                "/styles/{}/{}/{}/{}.{}",
                self.raster_style,
                coord.zoom(),
                coord.column(),
                coord.row(),
                format.extension()
            ),
        };

        RouteDecision {
            upstream_path,
            cache_control: self.cache_control.clone(),
            exposed_origin: self.exposed_origin.clone(),
        }
    }

    pub fn raster_style(&self) -> &str {
        &self.raster_style
    }

    pub fn vector_source(&self) -> &str {
        &self.vector_source
    }
}

impl Default for TileRouter {
    fn default() -> Self {
        Self::from_config(&GatewayConfig::default())
    }
}
