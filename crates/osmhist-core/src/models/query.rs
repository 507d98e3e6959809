//! History query requests and their shared settings.

use serde::{Deserialize, Serialize};

/// Default attribute groups requested from the API
pub const DEFAULT_PROPERTIES: &str = "metadata,tags";

/// Named OSM filter expression in the ohsome filter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDefinition {
    pub name: &'static str,
    pub expression: &'static str,
}

/// Form fields of one history query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// `min_lon,min_lat,max_lon,max_lat`
    pub bboxes: String,
    pub show_metadata: bool,
    pub properties: String,
    /// Comma-separated ISO dates
    pub time: String,
    pub filter: String,
}

/// Query options shared by every request of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Registry entry to query; defaults to `bbox_1_name`
    #[serde(default)]
    pub bbox: Option<String>,

    #[serde(default = "default_properties")]
    pub properties: String,

    #[serde(default = "default_show_metadata")]
    pub show_metadata: bool,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self { bbox: None, properties: default_properties(), show_metadata: default_show_metadata() }
    }
}

fn default_properties() -> String {
    DEFAULT_PROPERTIES.to_string()
}

fn default_show_metadata() -> bool {
    true
}
