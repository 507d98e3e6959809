//! Extents command implementation

use super::resolve_extents;
use crate::cli::ConfigArgs;
use crate::config_loader::{load_study_config, report_warnings};
use crate::logging;
use crate::output::OutputWriter;
use anyhow::Result;
use osmhist_core::models::Extent;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
struct ExtentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Min lon")]
    min_lon: f64,
    #[tabled(rename = "Min lat")]
    min_lat: f64,
    #[tabled(rename = "Max lon")]
    max_lon: f64,
    #[tabled(rename = "Max lat")]
    max_lat: f64,
}

impl ExtentRow {
    fn new(name: &str, extent: &Extent) -> Self {
        Self {
            name: name.to_string(),
            min_lon: extent.min_lon(),
            min_lat: extent.min_lat(),
            max_lon: extent.max_lon(),
            max_lat: extent.max_lat(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct FailureRow {
    #[tabled(rename = "Raster")]
    raster: String,
    #[tabled(rename = "Error")]
    error: String,
}

pub fn execute(args: ConfigArgs, output: &OutputWriter) -> Result<()> {
    let config = load_study_config(&args.config)?;
    logging::init_console()?;
    report_warnings(&config);

    let (report, registry) = resolve_extents(&config)?;

    output.section("Bounding boxes");
    let rows = registry.iter().map(|(name, extent)| ExtentRow::new(name, extent)).collect();
    output.table::<ExtentRow>(rows)?;

    if !report.failures.is_empty() {
        output.section("Skipped rasters");
        let failures = report
            .failures
            .iter()
            .map(|failure| FailureRow {
                raster: failure
                    .path
                    .as_ref()
                    .map_or_else(|| failure.combination.to_string(), |p| p.display().to_string()),
                error: failure.error.to_string(),
            })
            .collect();
        output.table::<FailureRow>(failures)?;
    }

    Ok(())
}
