//! Name → extent registry of resolved bounding boxes.

use crate::error::{OsmhistError, Result};
use crate::models::{BoundingBox, Extent};
use std::collections::BTreeMap;

/// Read-only mapping from display name to extent
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxRegistry {
    entries: BTreeMap<String, Extent>,
}

impl BoundingBoxRegistry {
    /// Merge boxes in processing order; a later box replaces an earlier one of the same name
    pub fn from_boxes<I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = BoundingBox>,
    {
        let mut entries = BTreeMap::new();
        for bbox in boxes {
            if let Some(previous) = entries.insert(bbox.name.clone(), bbox.extent) {
                tracing::debug!(
                    "Bounding box {} replaced: {} -> {}",
                    bbox.name,
                    previous,
                    bbox.extent
                );
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Result<BoundingBox> {
        self.entries
            .get(name)
            .map(|extent| BoundingBox::new(name, *extent))
            .ok_or_else(|| OsmhistError::BoundingBoxNotFound {
                name: name.to_string(),
                available: if self.entries.is_empty() {
                    "none".to_string()
                } else {
                    self.names().collect::<Vec<_>>().join(", ")
                },
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Extent)> {
        self.entries.iter().map(|(name, extent)| (name.as_str(), extent))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
