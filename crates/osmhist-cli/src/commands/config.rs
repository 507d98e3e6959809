//! Config command implementation

use crate::cli::ConfigArgs;
use crate::config_loader::{load_study_config, report_warnings};
use crate::logging;
use crate::output::OutputWriter;
use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
struct SettingRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(args: ConfigArgs, output: &OutputWriter) -> Result<()> {
    let config = load_study_config(&args.config)?;
    logging::init_console()?;
    report_warnings(&config);

    let mut rows: Vec<SettingRow> = config
        .settings
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| SettingRow { key, value, source: source.to_string() })
        .collect();

    // Sort by key for consistent output
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.section("Runtime settings");
    output.table(rows)?;

    if !output.is_json() {
        output.section("Study");
        output.kv("Raster directory", config.lulc_dir.display());
        output.kv("Raster combinations", config.raster_combinations().len());
        output.kv("Query bounding box", config.selected_bbox_name());

        output.section("Configuration Precedence");
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}
