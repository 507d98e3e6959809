//! osmhist geo - raster extents and CRS transformation
//!
//! Turns input rasters into named WGS 84 bounding boxes: the raster is read
//! through a [`raster::RasterReader`], its corners are reprojected through a
//! [`transform::CoordinateTransformer`], and the result is named by the
//! configured rules.

pub mod extent;
pub mod raster;
pub mod transform;

#[cfg(feature = "gdal")]
pub mod gdal_utils;

pub use extent::{ExtentResolver, ResolutionFailure, ResolutionReport};
pub use raster::{RasterBounds, RasterInfo, RasterReader};
pub use transform::{CoordinateTransformer, ProjTransformer};
