//! Error types for osmhist

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OsmhistError {
    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Raster errors
    #[error("Incomplete raster combination: {reason}")]
    IncompleteCombination { reason: String },

    #[error("Failed to open raster {path}: {reason}")]
    RasterOpen { path: PathBuf, reason: String },

    #[error("Raster {path} has no usable CRS: {reason}")]
    RasterCrs { path: PathBuf, reason: String },

    #[error("Failed to reproject from {crs} to EPSG:4326: {reason}")]
    Reprojection { crs: String, reason: String },

    // Bounding box errors
    #[error(
        "Extent [{min_lon}, {min_lat}, {max_lon}, {max_lat}] is inverted or not finite"
    )]
    InvalidExtent {
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    },

    #[error("No bounding box name rule matches template {template}")]
    NoNamingRule { template: String },

    #[error("Bounding box not found: {name} (available: {available})")]
    BoundingBoxNotFound { name: String, available: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, OsmhistError>;
