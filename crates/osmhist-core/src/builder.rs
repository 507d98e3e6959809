//! Query parameter builder.

use crate::models::{BoundingBox, FilterDefinition, QueryRequest, QuerySettings};
use chrono::NaiveDate;

/// Snapshot date used for a study year
pub fn year_end(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

/// Comma-joined ISO dates for the `time` field
pub fn timestamps_param(timestamps: &[NaiveDate]) -> String {
    timestamps
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Build one request per filter, all sharing extent, timestamps and settings
pub fn build_requests(
    bbox: &BoundingBox,
    timestamps: &[NaiveDate],
    settings: &QuerySettings,
    filters: &[FilterDefinition],
) -> Vec<QueryRequest> {
    let bboxes = bbox.extent.to_query_param();
    let time = timestamps_param(timestamps);

    filters
        .iter()
        .map(|filter| QueryRequest {
            bboxes: bboxes.clone(),
            show_metadata: settings.show_metadata,
            properties: settings.properties.clone(),
            time: time.clone(),
            filter: filter.expression.to_string(),
        })
        .collect()
}
