//! osmhist core - configuration, domain models and query construction
//!
//! This crate holds everything that does not touch rasters or the network:
//! the study configuration, bounding boxes and their registry, the static
//! filter table and the query parameter builder.

pub mod builder;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod registry;

pub use error::{OsmhistError, Result};
