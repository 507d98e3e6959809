//! Geographic bounding boxes in WGS 84 longitude/latitude.

use crate::error::{OsmhistError, Result};
use serde::Serialize;
use std::fmt;

/// Rectangular extent `[min_lon, min_lat, max_lon, max_lat]`
///
/// Construction goes through [`Extent::new`], which rejects non-finite
/// values and inverted ordering, so every `Extent` in the system satisfies
/// `min_lon <= max_lon` and `min_lat <= max_lat`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Extent {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self> {
        let finite = [min_lon, min_lat, max_lon, max_lat].iter().all(|v| v.is_finite());
        if !finite || min_lon > max_lon || min_lat > max_lat {
            return Err(OsmhistError::InvalidExtent { min_lon, min_lat, max_lon, max_lat });
        }
        Ok(Self { min_lon, min_lat, max_lon, max_lat })
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// Comma-separated form used by the `bboxes` request field
    pub fn to_query_param(&self) -> String {
        self.as_array().iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

/// Named extent derived from one input raster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub name: String,
    pub extent: Extent,
}

impl BoundingBox {
    pub fn new(name: impl Into<String>, extent: Extent) -> Self {
        Self { name: name.into(), extent }
    }
}
