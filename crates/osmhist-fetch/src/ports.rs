//! History API port.

use crate::error::QueryError;
use osmhist_core::models::QueryRequest;

/// Raw HTTP response of a history query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Port for the history query endpoint
pub trait HistoryApi {
    /// Send one request and return the response, whatever its status
    ///
    /// Only transport-level failures are errors; they are reported as
    /// [`QueryError::Network`].
    fn post(&self, request: &QueryRequest) -> Result<ApiResponse, QueryError>;
}
