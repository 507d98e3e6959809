//! reqwest client for the ohsome history API

use crate::error::QueryError;
use crate::ports::{ApiResponse, HistoryApi};
use osmhist_core::models::QueryRequest;
use reqwest::blocking::Client;
use reqwest::tls::Version;
use std::time::Duration;

/// Blocking ohsome client
///
/// HTTPS connections refuse anything older than TLS 1.2.
pub struct OhsomeClient {
    /// Full endpoint URL, e.g. `https://api.ohsome.org/v1/elements/geometry`
    endpoint: String,

    /// HTTP client
    client: Client,
}

impl OhsomeClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().min_tls_version(Version::TLS_1_2).timeout(timeout).build()?;
        Ok(Self { endpoint: endpoint.into(), client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HistoryApi for OhsomeClient {
    fn post(&self, request: &QueryRequest) -> Result<ApiResponse, QueryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(request)
            .send()
            .map_err(|e| QueryError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| QueryError::Network(format!("Failed to read response body: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}
