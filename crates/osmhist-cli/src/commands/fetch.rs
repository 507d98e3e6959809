//! Fetch command implementation

use super::resolve_extents;
use crate::cli::FetchArgs;
use crate::config_loader::{load_study_config_with_overrides, report_warnings};
use crate::logging;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use osmhist_core::builder::{build_requests, timestamps_param};
use osmhist_core::config::{CliConfigOverrides, StudyConfig};
use osmhist_core::filters::DEFAULT_FILTERS;
use osmhist_core::models::QueryRequest;
use osmhist_fetch::{FetchReport, OhsomeClient, QueryOutcome, QueryRunner};
use serde::Serialize;
use std::fs;
use std::time::{Duration, Instant};
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
struct RequestRow {
    #[tabled(rename = "Bbox")]
    bboxes: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Filter")]
    filter: String,
}

impl From<&QueryRequest> for RequestRow {
    fn from(request: &QueryRequest) -> Self {
        Self {
            bboxes: request.bboxes.clone(),
            time: request.time.clone(),
            filter: request.filter.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Filter")]
    filter: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Features")]
    features: String,
    #[tabled(rename = "Time (s)")]
    seconds: String,
}

impl From<&QueryOutcome> for OutcomeRow {
    fn from(outcome: &QueryOutcome) -> Self {
        let result = match &outcome.result {
            Ok(summary) => summary.output_path.display().to_string(),
            Err(err) => err.to_string(),
        };
        Self {
            filter: outcome.filter_name.clone(),
            result,
            features: outcome.feature_count.map_or_else(|| "N/A".to_string(), |n| n.to_string()),
            seconds: format!("{:.3}", outcome.elapsed.as_secs_f64()),
        }
    }
}

pub fn execute(args: FetchArgs, output: &OutputWriter) -> Result<()> {
    let started = Instant::now();

    let overrides = CliConfigOverrides {
        endpoint: args.endpoint,
        timeout_secs: args.timeout_secs,
        output_dir: args.output_dir,
        log_file: args.log_file,
    };
    let mut config = load_study_config_with_overrides(&args.config.config, overrides)?;
    if let Some(bbox) = args.bbox {
        config.query.bbox = Some(bbox);
    }

    logging::init_with_file(&config.settings.log_file.value)?;
    report_warnings(&config);

    let timestamps = config.timestamps();
    for line in run_header(&config, &timestamps) {
        tracing::info!("{}", line);
    }
    tracing::info!("{}", "-".repeat(40));

    let output_dir = config.output_dir().to_path_buf();
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let (report, registry) = resolve_extents(&config)?;
    if !report.failures.is_empty() {
        output.warning(format!("{} raster(s) could not be resolved", report.failures.len()));
    }

    let bbox = registry
        .get(config.selected_bbox_name())
        .context("Selected bounding box is not available")?;
    tracing::info!("Querying bounding box {}: {}", bbox.name, bbox.extent);

    let requests = build_requests(&bbox, &timestamps, &config.query, &DEFAULT_FILTERS);

    if args.dry_run {
        output.section("Planned requests");
        output.info(format!("Endpoint: {}", config.settings.endpoint.value));
        return output.table(requests.iter().map(RequestRow::from).collect());
    }

    let timeout = Duration::from_secs(config.settings.timeout_secs.value);
    let client = OhsomeClient::new(config.settings.endpoint.value.clone(), timeout)
        .context("Failed to build the HTTP client")?;
    tracing::debug!("Sending {} requests to {}", requests.len(), client.endpoint());

    let runner = QueryRunner::new(&client, &output_dir, &DEFAULT_FILTERS);
    let fetch_report = runner.run(&requests);

    tracing::info!("Total time: {:.3} s", started.elapsed().as_secs_f64());
    print_report(&fetch_report, output)
}

/// Years, input rasters and timestamps of the run, one log line each
fn run_header(config: &StudyConfig, timestamps: &[NaiveDate]) -> Vec<String> {
    let years: Vec<String> = config
        .years
        .iter()
        .map(|year| year.map_or_else(|| "null".to_string(), |y| y.to_string()))
        .collect();
    let rasters: Vec<String> = config
        .raster_combinations()
        .iter()
        .filter_map(|combination| combination.resolved_filename().ok())
        .collect();

    vec![
        format!("Yearstamps of input raster datasets: [{}]", years.join(", ")),
        format!("Input rasters to be used for processing: {}", rasters.join(", ")),
        format!("Timestamps considered: {}", timestamps_param(timestamps)),
    ]
}

fn print_report(report: &FetchReport, output: &OutputWriter) -> Result<()> {
    output.section("Query results");
    output.table(report.outcomes.iter().map(OutcomeRow::from).collect())?;

    if report.failed() == 0 {
        output.success(format!("{} queries completed", report.succeeded()));
    } else {
        output.warning(format!(
            "{} of {} queries failed",
            report.failed(),
            report.outcomes.len()
        ));
    }
    Ok(())
}
