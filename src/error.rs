//! Gateway error taxonomy.
//!
//! Client-input errors (coordinates, format) and upstream transport failures
//! share one enum so the HTTP layer has a single translation table
//! (see `http::response`).

use std::fmt;

use thiserror::Error;

/// Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// One of the three addressable fields of a tile request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateField {
    Zoom,
    Column,
    Row,
}

impl CoordinateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateField::Zoom => "zoom",
            CoordinateField::Column => "column",
            CoordinateField::Row => "row",
        }
    }
}

impl fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced to clients by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Invalid tile coordinates: {field} is not an integer ({value:?})")]
    InvalidCoordinateSyntax {
        field: CoordinateField,
        value: String,
    },

    #[error("Zoom level must be between 0 and {max_zoom}, got {zoom}")]
    ZoomOutOfRange { zoom: i64, max_zoom: u8 },

    #[error("Tile {field} {value} out of range for zoom level {zoom} (must be below {max_tile})")]
    CoordinateOutOfRangeForZoom {
        field: CoordinateField,
        value: i64,
        zoom: u8,
        max_tile: u64,
    },

    #[error("Unsupported tile format: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("Upstream unavailable: {reason}")]
    UpstreamUnavailable { reason: String },
}

impl GatewayError {
    /// HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            GatewayError::InvalidCoordinateSyntax { .. }
            | GatewayError::ZoomOutOfRange { .. }
            | GatewayError::CoordinateOutOfRangeForZoom { .. } => 400,
            GatewayError::UnsupportedFormat { .. } => 404,
            GatewayError::UpstreamUnavailable { .. } => 502,
        }
    }

    /// Short label used for the rejection metric and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            GatewayError::InvalidCoordinateSyntax { .. } => "invalid_syntax",
            GatewayError::ZoomOutOfRange { .. } => "zoom_out_of_range",
            GatewayError::CoordinateOutOfRangeForZoom { .. } => "coordinate_out_of_range",
            GatewayError::UnsupportedFormat { .. } => "unsupported_format",
            GatewayError::UpstreamUnavailable { .. } => "upstream_unavailable",
        }
    }

    /// True for errors caused by the client's request.
    pub fn is_client_error(&self) -> bool {
        self.http_status_code() < 500
    }
}
