//! Per-query error kinds

use std::path::PathBuf;
use thiserror::Error;

/// Why a single history query produced no output file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Connection, TLS or timeout failure before a status was received
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unsuccessful response status: {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}
