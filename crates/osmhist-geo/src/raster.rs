//! Raster metadata port.

use osmhist_core::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Native bounds of a raster in its own CRS
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RasterBounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl fmt::Display for RasterBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox(left={}, bottom={}, right={}, top={})",
            self.left, self.bottom, self.right, self.top
        )
    }
}

/// Bounds plus the CRS they are expressed in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterInfo {
    pub bounds: RasterBounds,
    /// `EPSG:<code>` when the raster carries an authority code, WKT otherwise
    pub crs: String,
}

/// Port for reading raster bounds and CRS
///
/// Implementations must release the underlying file handle before
/// returning, on success and on error alike.
pub trait RasterReader {
    fn read_info(&self, path: &Path) -> Result<RasterInfo>;
}
