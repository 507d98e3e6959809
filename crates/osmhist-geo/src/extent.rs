//! Raster extent resolution.

use crate::raster::RasterReader;
use crate::transform::{reproject_bounds, CoordinateTransformer};
use osmhist_core::config::StudyConfig;
use osmhist_core::error::Result;
use osmhist_core::models::{BoundingBox, NamingRules, RasterCombination};
use osmhist_core::registry::BoundingBoxRegistry;
use osmhist_core::OsmhistError;
use std::path::{Component, Path, PathBuf};

/// A combination that could not be turned into a bounding box
#[derive(Debug)]
pub struct ResolutionFailure {
    pub combination: RasterCombination,
    pub path: Option<PathBuf>,
    pub error: OsmhistError,
}

/// Outcome of resolving every combination
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Boxes in processing order
    pub resolved: Vec<BoundingBox>,
    pub failures: Vec<ResolutionFailure>,
}

impl ResolutionReport {
    /// Merge resolved boxes into a registry, later boxes winning
    pub fn registry(&self) -> BoundingBoxRegistry {
        BoundingBoxRegistry::from_boxes(self.resolved.iter().cloned())
    }
}

/// Resolves raster combinations into named WGS 84 bounding boxes
pub struct ExtentResolver<R, T>
where
    R: RasterReader,
    T: CoordinateTransformer,
{
    reader: R,
    transformer: T,
    raster_dir: PathBuf,
    naming: NamingRules,
}

impl<R, T> ExtentResolver<R, T>
where
    R: RasterReader,
    T: CoordinateTransformer,
{
    /// Create a resolver; `base_dir` and `lulc_dir` are joined and normalized
    pub fn new(
        reader: R,
        transformer: T,
        base_dir: &Path,
        lulc_dir: &Path,
        naming: NamingRules,
    ) -> Self {
        Self { reader, transformer, raster_dir: normalize_path(&base_dir.join(lulc_dir)), naming }
    }

    pub fn from_config(reader: R, transformer: T, base_dir: &Path, config: &StudyConfig) -> Self {
        Self::new(reader, transformer, base_dir, &config.lulc_dir, config.naming.clone())
    }

    /// Absolute, normalized path of a resolved raster filename
    pub fn raster_path(&self, filename: &str) -> PathBuf {
        normalize_path(&self.raster_dir.join(filename))
    }

    /// Resolve one combination
    pub fn resolve_one(&self, combination: &RasterCombination) -> Result<BoundingBox> {
        let filename = combination.resolved_filename()?;
        let path = self.raster_path(&filename);
        self.resolve_path(combination, &path)
    }

    fn resolve_path(&self, combination: &RasterCombination, path: &Path) -> Result<BoundingBox> {
        tracing::info!("Path to the input raster dataset: {}", path.display());

        let info = self.reader.read_info(path)?;
        tracing::debug!("Bbox before CRS transformation: {} ({})", info.bounds, info.crs);

        let extent = reproject_bounds(&self.transformer, &info.bounds, &info.crs)?;
        tracing::debug!(
            "Bounds in WGS84: min lon: {}, min lat: {}, max lon: {}, max lat: {}",
            extent.min_lon(),
            extent.min_lat(),
            extent.max_lon(),
            extent.max_lat()
        );

        // resolved_filename succeeded, so the template is present
        let template = combination.template.as_deref().unwrap_or_default();
        let name = self.naming.name_for(template)?;

        let bbox = BoundingBox::new(name, extent);
        tracing::info!("Bounding box for {}: {}", bbox.name, bbox.extent);
        Ok(bbox)
    }

    /// Resolve every combination, isolating failures per item
    pub fn resolve_all(&self, combinations: &[RasterCombination]) -> ResolutionReport {
        let mut report = ResolutionReport::default();

        for combination in combinations {
            let path = combination.resolved_filename().ok().map(|f| self.raster_path(&f));

            match self.resolve_one(combination) {
                Ok(bbox) => report.resolved.push(bbox),
                Err(error) => {
                    match &path {
                        Some(p) => tracing::error!("Failed to transform {}: {}", p.display(), error),
                        None => tracing::error!("Failed to resolve {}: {}", combination, error),
                    }
                    report.failures.push(ResolutionFailure {
                        combination: combination.clone(),
                        path,
                        error,
                    });
                }
            }
        }

        report
    }
}

/// Lexically normalize a path, resolving `.` and `..` without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
