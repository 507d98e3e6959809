//! Sequential execution of history queries.

use crate::audit::audit_features;
use crate::error::QueryError;
use crate::ports::HistoryApi;
use osmhist_core::filters::{filter_name, UNKNOWN_FILTER};
use osmhist_core::models::{FilterDefinition, QueryRequest};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of a query that produced an output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySummary {
    pub status: u16,
    pub feature_count: usize,
    /// Non-metadata property keys, sorted
    pub attributes: BTreeSet<String>,
    pub output_path: PathBuf,
}

/// What happened to one request
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub filter_name: String,
    pub elapsed: Duration,
    /// Features counted in this iteration; `None` when the response was never audited
    pub feature_count: Option<usize>,
    pub result: Result<QuerySummary, QueryError>,
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a whole run, in request order
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub outcomes: Vec<QueryOutcome>,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn outcome(&self, filter_name: &str) -> Option<&QueryOutcome> {
        self.outcomes.iter().find(|o| o.filter_name == filter_name)
    }
}

/// Runs requests one after another against a history API
///
/// A failing request never stops the run; its error is recorded in the
/// report and the next request is issued.
pub struct QueryRunner<'a, A>
where
    A: HistoryApi + ?Sized,
{
    api: &'a A,
    output_dir: PathBuf,
    filters: &'a [FilterDefinition],
}

impl<'a, A> QueryRunner<'a, A>
where
    A: HistoryApi + ?Sized,
{
    pub fn new(api: &'a A, output_dir: impl Into<PathBuf>, filters: &'a [FilterDefinition]) -> Self {
        Self { api, output_dir: output_dir.into(), filters }
    }

    /// Execute every request in order
    pub fn run(&self, requests: &[QueryRequest]) -> FetchReport {
        FetchReport { outcomes: requests.iter().map(|r| self.run_one(r)).collect() }
    }

    /// Execute one request, logging progress and timing
    pub fn run_one(&self, request: &QueryRequest) -> QueryOutcome {
        let filter_name = match filter_name(&request.filter, self.filters) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!("Filter not found in the filter table: {}", request.filter);
                UNKNOWN_FILTER.to_string()
            }
        };
        tracing::info!("Filter variable name: {}", filter_name);

        let started = Instant::now();
        let mut feature_count = None;
        let result = self.execute(request, &filter_name, &mut feature_count);
        let elapsed = started.elapsed();

        match &result {
            Ok(_) | Err(QueryError::Status(_)) => {}
            Err(err @ QueryError::Network(_)) => {
                tracing::error!("Request failed for params: {:?}. Error: {}", request, err)
            }
            Err(err) => tracing::error!("Error occurred: {}", err),
        }

        tracing::info!("Query time: {:.3} s", elapsed.as_secs_f64());
        match feature_count {
            Some(count) => tracing::info!("Number of features: {}", count),
            None => tracing::info!("Number of features: N/A"),
        }
        tracing::info!("{}", "-".repeat(40));

        QueryOutcome { filter_name, elapsed, feature_count, result }
    }

    fn execute(
        &self,
        request: &QueryRequest,
        filter_name: &str,
        feature_count: &mut Option<usize>,
    ) -> Result<QuerySummary, QueryError> {
        let response = self.api.post(request)?;
        tracing::info!("Response status code: {}", response.status);

        if response.status != 200 {
            return Err(QueryError::Status(response.status));
        }

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| QueryError::MalformedBody(e.to_string()))?;

        let audit = audit_features(&body);
        *feature_count = Some(audit.feature_count);

        tracing::info!(
            "Total unique attributes across all features, excluding metadata (@): {}",
            audit.attributes.len()
        );
        for attribute in &audit.attributes {
            tracing::info!(" - {}", attribute);
        }

        let output_path = self.output_dir.join(format!("{}.geojson", filter_name));
        write_geojson(&output_path, &body)?;
        tracing::info!("GeoJSON has been saved to {}", output_path.display());

        Ok(QuerySummary {
            status: response.status,
            feature_count: audit.feature_count,
            attributes: audit.attributes,
            output_path,
        })
    }
}

/// Write a response body to `path`, replacing any existing file
fn write_geojson(path: &Path, body: &Value) -> Result<(), QueryError> {
    let write_error = |reason: String| QueryError::Write { path: path.to_path_buf(), reason };

    let file = File::create(path).map_err(|e| write_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, body).map_err(|e| write_error(e.to_string()))?;
    writer.flush().map_err(|e| write_error(e.to_string()))
}
