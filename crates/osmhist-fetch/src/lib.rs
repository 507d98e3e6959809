//! osmhist fetch - history API client and query runner
//!
//! Requests built by `osmhist-core` are sent one at a time through a
//! [`ports::HistoryApi`]; every response is audited and successful ones are
//! written as GeoJSON.

pub mod audit;
pub mod error;
pub mod ohsome;
pub mod ports;
pub mod runner;

pub use error::QueryError;
pub use ohsome::OhsomeClient;
pub use ports::{ApiResponse, HistoryApi};
pub use runner::{FetchReport, QueryOutcome, QueryRunner, QuerySummary};
