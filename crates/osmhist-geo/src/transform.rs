//! CRS transformation to WGS 84 longitude/latitude

use crate::raster::RasterBounds;
use osmhist_core::error::{OsmhistError, Result};
use osmhist_core::models::Extent;
use proj::Proj;

/// Geographic target CRS of every bounding box
pub const WGS84: &str = "EPSG:4326";

/// Port for converting points from a source CRS to WGS 84
///
/// Output points are always ordered (longitude, latitude), whatever axis
/// order the target CRS declares.
pub trait CoordinateTransformer {
    fn to_wgs84(&self, source_crs: &str, points: &[(f64, f64)]) -> Result<Vec<(f64, f64)>>;
}

/// Check if a CRS string already denotes WGS 84
pub fn is_wgs84(crs: &str) -> bool {
    crs.trim().eq_ignore_ascii_case(WGS84)
}

/// PROJ-backed transformer
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjTransformer;

impl CoordinateTransformer for ProjTransformer {
    fn to_wgs84(&self, source_crs: &str, points: &[(f64, f64)]) -> Result<Vec<(f64, f64)>> {
        // If CRS are the same, no transformation needed
        if is_wgs84(source_crs) {
            return Ok(points.to_vec());
        }

        // new_known_crs normalizes axis order to (x = lon, y = lat)
        let proj = Proj::new_known_crs(source_crs, WGS84, None).map_err(|e| {
            OsmhistError::Reprojection {
                crs: source_crs.to_string(),
                reason: format!("Failed to create projection: {}", e),
            }
        })?;

        points
            .iter()
            .map(|&(x, y)| {
                proj.convert((x, y)).map_err(|e| OsmhistError::Reprojection {
                    crs: source_crs.to_string(),
                    reason: format!("Projection failed at ({}, {}): {}", x, y, e),
                })
            })
            .collect()
    }
}

/// Reproject raster bounds to a WGS 84 extent
///
/// Only the lower-left and upper-right corners are transformed. For CRSs
/// with noticeable rotation or shear relative to WGS 84 the true extent is
/// larger than the result; an inverted result is rejected.
pub fn reproject_bounds<T>(transformer: &T, bounds: &RasterBounds, source_crs: &str) -> Result<Extent>
where
    T: CoordinateTransformer + ?Sized,
{
    let corners =
        transformer.to_wgs84(source_crs, &[(bounds.left, bounds.bottom), (bounds.right, bounds.top)])?;

    match corners.as_slice() {
        [(min_lon, min_lat), (max_lon, max_lat)] => {
            Extent::new(*min_lon, *min_lat, *max_lon, *max_lat)
        }
        other => Err(OsmhistError::Reprojection {
            crs: source_crs.to_string(),
            reason: format!("Expected 2 transformed corners, got {}", other.len()),
        }),
    }
}
