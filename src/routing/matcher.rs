//! Tile path matching.
//!
//! # Responsibilities
//! - Split the last path segment into row and extension
//! - Resolve the extension to a `TileFormat`
//! - Hand the three coordinate segments to the validator
//!
//! # Design Decisions
//! - A last segment without `.` is not a tile route (plain 404)
//! - Format is resolved before coordinates: an unknown extension is a
//!   route miss even if the coordinates are also bad
//! - No regex; one `rsplit_once` per request

use crate::error::GatewayResult;
use crate::tile::{CoordinateValidator, TileCoordinate, TileFormat};

/// Path prefix under which tiles are served.
pub const TILES_PREFIX: &str = "/tiles/";

/// A tile request that passed format resolution and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRequest {
    pub coordinate: TileCoordinate,
    pub format: TileFormat,
}

/// Matches `/tiles/{z}/{x}/{y}.{ext}` requests.
#[derive(Debug, Clone, Copy)]
pub struct TileMatcher {
    validator: CoordinateValidator,
}

impl TileMatcher {
    pub fn new(validator: CoordinateValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &CoordinateValidator {
        &self.validator
    }

    /// Match already-extracted path segments (`z`, `x`, `"{y}.{ext}"`).
    ///
    /// Returns `None` when `file` carries no extension at all.
    pub fn match_segments(&self, zoom: &str, column: &str, file: &str) -> Option<GatewayResult<TileRequest>> {
        let (row, extension) = file.rsplit_once('.')?;

        Some(TileFormat::from_extension(extension).and_then(|format| {
            let coordinate = self.validator.validate(zoom, column, row)?;
            Ok(TileRequest { coordinate, format })
        }))
    }

    /// Match a full request path such as `/tiles/5/10/10.pbf`.
    pub fn match_path(&self, path: &str) -> Option<GatewayResult<TileRequest>> {
        let rest = path.strip_prefix(TILES_PREFIX)?;
        let mut segments = rest.split('/');

        let zoom = segments.next()?;
        let column = segments.next()?;
        let file = segments.next()?;
        if segments.next().is_some() {
            return None;
        }

        self.match_segments(zoom, column, file)
    }
}

impl Default for TileMatcher {
    fn default() -> Self {
        Self::new(CoordinateValidator::default())
    }
}
