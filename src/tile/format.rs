//! Supported tile encodings.

use serde::Serialize;

use crate::error::{GatewayError, GatewayResult};

/// Extensions accepted on `/tiles/{z}/{x}/{y}.{ext}`.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pbf", "png", "jpg", "jpeg"];

/// Requested tile format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileFormat {
    /// Mapbox vector tile (protobuf).
    Vector,
    RasterPng,
    /// JPEG requested as `.jpg`.
    RasterJpg,
    /// JPEG requested as `.jpeg`.
    RasterJpeg,
}

impl TileFormat {
    /// Resolve a request extension, ignoring ASCII case.
    pub fn from_extension(extension: &str) -> GatewayResult<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pbf" => Ok(TileFormat::Vector),
            "png" => Ok(TileFormat::RasterPng),
            "jpg" => Ok(TileFormat::RasterJpg),
            "jpeg" => Ok(TileFormat::RasterJpeg),
            _ => Err(GatewayError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Extension used on the upstream path, spelled as requested.
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::Vector => "pbf",
            TileFormat::RasterPng => "png",
            TileFormat::RasterJpg => "jpg",
            TileFormat::RasterJpeg => "jpeg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            TileFormat::Vector => "application/x-protobuf",
            TileFormat::RasterPng => "image/png",
            TileFormat::RasterJpg | TileFormat::RasterJpeg => "image/jpeg",
        }
    }

    pub fn is_raster(&self) -> bool {
        !matches!(self, TileFormat::Vector)
    }

    /// Metric/log label.
    pub fn label(&self) -> &'static str {
        match self {
            TileFormat::Vector => "vector",
            TileFormat::RasterPng => "raster-png",
            TileFormat::RasterJpg => "raster-jpg",
            TileFormat::RasterJpeg => "raster-jpeg",
        }
    }
}
