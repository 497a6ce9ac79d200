//! XYZ tile coordinates and their validation.
//!
//! # Responsibilities
//! - Parse raw path segments as base-10 integers
//! - Check zoom against the configured pyramid depth
//! - Check column/row against the `2^zoom` grid at that zoom
//!
//! # Design Decisions
//! - A leading `-` is accepted syntactically so negative values are
//!   reported as range errors rather than syntax errors
//! - Literals that overflow `i64` saturate and fail the range checks
//! - Fields are checked in order zoom, column, row; first failure wins

use serde::Serialize;

use crate::error::{CoordinateField, GatewayError, GatewayResult};

/// Deepest zoom any deployment may configure.
///
/// At zoom 32 the largest column/row index is `2^32 - 1`, which still fits `u32`.
pub const MAX_SUPPORTED_ZOOM: u8 = 32;

/// Default maximum zoom of the upstream renderer's pyramid.
pub const DEFAULT_MAX_ZOOM: u8 = 22;

/// A validated tile address (z/x/y).
///
/// Only obtainable through [`validate`] or [`CoordinateValidator`], so every
/// value satisfies `column < 2^zoom` and `row < 2^zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoordinate {
    zoom: u8,
    column: u32,
    row: u32,
}

impl TileCoordinate {
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Number of tiles along each axis at this coordinate's zoom.
    pub fn grid_size(&self) -> u64 {
        grid_size(self.zoom)
    }
}

impl std::fmt::Display for TileCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.column, self.row)
    }
}

/// Validates raw coordinates against a fixed maximum zoom.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateValidator {
    max_zoom: u8,
}

impl CoordinateValidator {
    /// Create a validator. `max_zoom` is clamped to [`MAX_SUPPORTED_ZOOM`].
    pub fn new(max_zoom: u8) -> Self {
        Self {
            max_zoom: max_zoom.min(MAX_SUPPORTED_ZOOM),
        }
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    pub fn validate(&self, zoom: &str, column: &str, row: &str) -> GatewayResult<TileCoordinate> {
        validate(zoom, column, row, self.max_zoom)
    }
}

impl Default for CoordinateValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ZOOM)
    }
}

/// Parse and bounds-check a z/x/y triple.
pub fn validate(
    zoom_raw: &str,
    column_raw: &str,
    row_raw: &str,
    max_zoom: u8,
) -> GatewayResult<TileCoordinate> {
    let zoom = parse_integer(CoordinateField::Zoom, zoom_raw)?;
    let column = parse_integer(CoordinateField::Column, column_raw)?;
    let row = parse_integer(CoordinateField::Row, row_raw)?;

    let max_zoom = max_zoom.min(MAX_SUPPORTED_ZOOM);
    if zoom < 0 || zoom > i64::from(max_zoom) {
        return Err(GatewayError::ZoomOutOfRange { zoom, max_zoom });
    }
    let zoom = zoom as u8;
    let max_tile = grid_size(zoom);

    let column = check_axis(CoordinateField::Column, column, zoom, max_tile)?;
    let row = check_axis(CoordinateField::Row, row, zoom, max_tile)?;

    Ok(TileCoordinate { zoom, column, row })
}

fn grid_size(zoom: u8) -> u64 {
    1u64 << zoom
}

fn check_axis(field: CoordinateField, value: i64, zoom: u8, max_tile: u64) -> GatewayResult<u32> {
    if value < 0 || value as u64 >= max_tile {
        return Err(GatewayError::CoordinateOutOfRangeForZoom {
            field,
            value,
            zoom,
            max_tile,
        });
    }
    // max_tile <= 2^32, so value fits
    Ok(value as u32)
}

fn parse_integer(field: CoordinateField, raw: &str) -> GatewayResult<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GatewayError::InvalidCoordinateSyntax {
            field,
            value: raw.to_string(),
        });
    }

    // Grammar is already checked, so a parse failure can only be overflow.
    Ok(raw.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}
