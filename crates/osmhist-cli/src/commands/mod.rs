//! Command implementations

mod config;
mod extents;
mod fetch;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use osmhist_core::config::StudyConfig;
use osmhist_core::registry::BoundingBoxRegistry;
use osmhist_geo::{ExtentResolver, ProjTransformer, ResolutionReport};

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Fetch(args) => fetch::execute(args, &output),
        Commands::Extents(args) => extents::execute(args, &output),
        Commands::Config(args) => config::execute(args, &output),
    }
}

/// Resolve every raster combination relative to the working directory
fn resolve_extents(config: &StudyConfig) -> Result<(ResolutionReport, BoundingBoxRegistry)> {
    let base_dir = std::env::current_dir().context("Failed to read the working directory")?;
    let resolver =
        ExtentResolver::from_config(raster_reader()?, ProjTransformer, &base_dir, config);

    let report = resolver.resolve_all(&config.raster_combinations());
    let registry = report.registry();
    Ok((report, registry))
}

#[cfg(feature = "gdal")]
fn raster_reader() -> Result<osmhist_geo::gdal_utils::GdalRasterReader> {
    osmhist_geo::gdal_utils::GdalRasterReader::new().context("Failed to initialize GDAL")
}

#[cfg(not(feature = "gdal"))]
fn raster_reader() -> Result<unsupported::NoRasterSupport> {
    Ok(unsupported::NoRasterSupport)
}

#[cfg(not(feature = "gdal"))]
mod unsupported {
    use osmhist_core::error::Result;
    use osmhist_core::OsmhistError;
    use osmhist_geo::{RasterInfo, RasterReader};
    use std::path::Path;

    /// Reader used when the binary is built without GDAL
    pub struct NoRasterSupport;

    impl RasterReader for NoRasterSupport {
        fn read_info(&self, path: &Path) -> Result<RasterInfo> {
            Err(OsmhistError::RasterOpen {
                path: path.to_path_buf(),
                reason: "osmhist was built without the gdal feature".to_string(),
            })
        }
    }
}
