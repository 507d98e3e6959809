//! GDAL raster reader and error handling helpers

use crate::raster::{RasterBounds, RasterInfo, RasterReader};
use gdal::errors::GdalError;
use gdal::spatial_ref::SpatialRef;
use gdal::Dataset;
use osmhist_core::error::{OsmhistError, Result};
use std::path::Path;

/// Convert GDAL errors to raster open errors with context
pub fn convert_gdal_error(err: GdalError, path: &Path, context: &str) -> OsmhistError {
    OsmhistError::RasterOpen { path: path.to_path_buf(), reason: format!("{}: {}", context, err) }
}

/// Verify that a file exists and is a regular file
pub fn verify_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(OsmhistError::RasterOpen {
            path: path.to_path_buf(),
            reason: "No such file".to_string(),
        });
    }

    if !path.is_file() {
        return Err(OsmhistError::RasterOpen {
            path: path.to_path_buf(),
            reason: "Path is not a file".to_string(),
        });
    }

    Ok(())
}

/// Extract CRS information from a GDAL spatial reference
pub fn extract_crs_from_spatial_ref(spatial_ref: &SpatialRef, path: &Path) -> Result<String> {
    // Try to get EPSG code first
    let is_epsg = spatial_ref.auth_name().map(|name| name.eq_ignore_ascii_case("EPSG"));
    if let (Ok(true), Ok(code)) = (is_epsg, spatial_ref.auth_code()) {
        return Ok(format!("EPSG:{}", code));
    }

    // Fall back to WKT representation
    spatial_ref.to_wkt().map_err(|e| OsmhistError::RasterCrs {
        path: path.to_path_buf(),
        reason: format!("Failed to extract CRS as WKT: {}", e),
    })
}

/// Raster reader backed by GDAL
///
/// GeoTIFF CRS lookup prefers the EPSG code over the embedded GeoKeys,
/// so rasters written with an EPSG code keep it.
#[derive(Debug, Default, Clone, Copy)]
pub struct GdalRasterReader;

impl GdalRasterReader {
    pub fn new() -> Result<Self> {
        gdal::config::set_config_option("GTIFF_SRS_SOURCE", "EPSG").map_err(|e| {
            OsmhistError::ConfigInvalid {
                key: "GTIFF_SRS_SOURCE".to_string(),
                reason: format!("Failed to set GDAL option: {}", e),
            }
        })?;
        Ok(Self)
    }
}

impl RasterReader for GdalRasterReader {
    fn read_info(&self, path: &Path) -> Result<RasterInfo> {
        verify_file_exists(path)?;

        // Dropped on every return path, which closes the dataset
        let dataset =
            Dataset::open(path).map_err(|e| convert_gdal_error(e, path, "Failed to open dataset"))?;

        let gt = dataset
            .geo_transform()
            .map_err(|e| convert_gdal_error(e, path, "Failed to read geotransform"))?;
        if gt[2] != 0.0 || gt[4] != 0.0 {
            tracing::warn!(
                "Raster {} has rotation terms; bounds use the axis-aligned corners only",
                path.display()
            );
        }

        let (width, height) = dataset.raster_size();
        let x_edge = gt[0] + gt[1] * width as f64;
        let y_edge = gt[3] + gt[5] * height as f64;
        let bounds = RasterBounds {
            left: gt[0].min(x_edge),
            bottom: gt[3].min(y_edge),
            right: gt[0].max(x_edge),
            top: gt[3].max(y_edge),
        };

        let spatial_ref = dataset.spatial_ref().map_err(|e| OsmhistError::RasterCrs {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let crs = extract_crs_from_spatial_ref(&spatial_ref, path)?;

        Ok(RasterInfo { bounds, crs })
    }
}
