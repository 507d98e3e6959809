use geojson::GeoJson;
use osmhist_core::builder::{build_requests, year_end};
use osmhist_core::filters::{DEFAULT_FILTERS, FILTER_RAILWAYS};
use osmhist_core::models::{BoundingBox, Extent, QueryRequest, QuerySettings};
use osmhist_fetch::{ApiResponse, HistoryApi, QueryError, QueryRunner};
use std::cell::RefCell;
use std::collections::BTreeSet;
use tempfile::TempDir;

const TWO_ROADS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "geometry": {"type": "LineString", "coordinates": [[8.67, 49.41], [8.68, 49.42]]},
      "properties": {"@osmId": "way/1", "@validFrom": "2019-01-01T00:00:00Z", "highway": "primary"}
    },
    {
      "type": "Feature",
      "geometry": {"type": "LineString", "coordinates": [[8.69, 49.41], [8.70, 49.40]]},
      "properties": {"@osmId": "way/2", "@snapshotTimestamp": "2020-12-31T00:00:00Z", "highway": "secondary"}
    }
  ]
}"#;

const EMPTY: &str = r#"{"type": "FeatureCollection", "features": []}"#;

/// Railways answer with a fixed status; roads get two features, the rest none
struct ScriptedApi {
    calls: RefCell<Vec<QueryRequest>>,
    railway_status: u16,
}

impl ScriptedApi {
    fn new(railway_status: u16) -> Self {
        Self { calls: RefCell::new(Vec::new()), railway_status }
    }
}

impl HistoryApi for ScriptedApi {
    fn post(&self, request: &QueryRequest) -> Result<ApiResponse, QueryError> {
        self.calls.borrow_mut().push(request.clone());
        if request.filter == FILTER_RAILWAYS {
            return Ok(ApiResponse { status: self.railway_status, body: String::new() });
        }
        let body = if request.filter.contains("highway") { TWO_ROADS } else { EMPTY };
        Ok(ApiResponse { status: 200, body: body.to_string() })
    }
}

fn requests() -> Vec<QueryRequest> {
    let extent = Extent::new(8.6, 49.3, 8.8, 49.5).unwrap();
    let bbox = BoundingBox::new("bbox_esa", extent);
    let timestamps: Vec<_> = [2018, 2020].into_iter().filter_map(year_end).collect();
    build_requests(&bbox, &timestamps, &QuerySettings::default(), &DEFAULT_FILTERS)
}

#[test]
fn test_roads_written_with_audited_attributes() {
    let dir = TempDir::new().unwrap();
    let api = ScriptedApi::new(200);
    let runner = QueryRunner::new(&api, dir.path(), &DEFAULT_FILTERS);

    let report = runner.run(&requests());

    let roads = report.outcome("filter_roads").unwrap();
    let summary = roads.result.as_ref().unwrap();
    assert_eq!(summary.status, 200);
    assert_eq!(summary.feature_count, 2);
    assert_eq!(summary.attributes, BTreeSet::from(["highway".to_string()]));
    assert_eq!(summary.output_path, dir.path().join("filter_roads.geojson"));

    let written = std::fs::read_to_string(&summary.output_path).unwrap();
    match written.parse::<GeoJson>().unwrap() {
        GeoJson::FeatureCollection(collection) => assert_eq!(collection.features.len(), 2),
        other => panic!("expected a feature collection, got {:?}", other),
    }
}

#[test]
fn test_failed_status_skips_file_and_continues() {
    let dir = TempDir::new().unwrap();
    let api = ScriptedApi::new(500);
    let runner = QueryRunner::new(&api, dir.path(), &DEFAULT_FILTERS);

    let report = runner.run(&requests());

    assert_eq!(api.calls.borrow().len(), 5);
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failed(), 1);

    let railways = report.outcome("filter_railways").unwrap();
    assert_eq!(railways.result, Err(QueryError::Status(500)));
    assert_eq!(railways.feature_count, None);
    assert!(!dir.path().join("filter_railways.geojson").exists());

    for name in ["filter_roads", "filter_waterways", "filter_waterbodies", "filter_vineyards"] {
        assert!(dir.path().join(format!("{}.geojson", name)).exists(), "{} missing", name);
    }
}

#[test]
fn test_feature_count_does_not_leak_between_queries() {
    let dir = TempDir::new().unwrap();
    let api = ScriptedApi::new(502);
    let runner = QueryRunner::new(&api, dir.path(), &DEFAULT_FILTERS);

    let report = runner.run(&requests());

    // roads (2 features) run right before railways
    assert_eq!(report.outcomes[0].feature_count, Some(2));
    assert_eq!(report.outcomes[1].filter_name, "filter_railways");
    assert_eq!(report.outcomes[1].feature_count, None);
    assert_eq!(report.outcomes[2].feature_count, Some(0));
}

#[test]
fn test_requests_carry_all_timestamps() {
    let dir = TempDir::new().unwrap();
    let api = ScriptedApi::new(200);
    let runner = QueryRunner::new(&api, dir.path(), &DEFAULT_FILTERS);

    runner.run(&requests());

    for call in api.calls.borrow().iter() {
        assert_eq!(call.time, "2018-12-31,2020-12-31");
        assert_eq!(call.bboxes, "8.6,49.3,8.8,49.5");
        assert!(call.show_metadata);
    }
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("filter_vineyards.geojson");
    std::fs::write(&target, "stale").unwrap();

    let api = ScriptedApi::new(200);
    let runner = QueryRunner::new(&api, dir.path(), &DEFAULT_FILTERS);
    runner.run(&requests());

    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.parse::<GeoJson>().is_ok());
}
