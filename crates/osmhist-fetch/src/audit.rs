//! Attribute-presence audit of a feature collection response.

use serde_json::Value;
use std::collections::BTreeSet;

/// Property keys starting with this prefix are provenance metadata
pub const METADATA_PREFIX: char = '@';

/// Feature count and non-metadata property keys of a response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeAudit {
    pub feature_count: usize,
    /// Sorted, unique keys across all features
    pub attributes: BTreeSet<String>,
}

/// Audit the `features` array of a response body
///
/// A missing `features` array counts as empty; features without a
/// `properties` object contribute no keys.
pub fn audit_features(body: &Value) -> AttributeAudit {
    let features =
        body.get("features").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);

    let attributes = features
        .iter()
        .filter_map(|feature| feature.get("properties").and_then(Value::as_object))
        .flat_map(|properties| properties.keys())
        .filter(|key| !key.starts_with(METADATA_PREFIX))
        .cloned()
        .collect();

    AttributeAudit { feature_count: features.len(), attributes }
}
