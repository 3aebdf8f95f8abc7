pub mod error;

pub use error::AnalyzeError;

use crate::models::{AnalysisResult, SearchParams};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Path of the analysis endpoint, relative to the server base URL
pub const ANALYZE_PATH: &str = "/api/analyze";

/// HTTP client for `POST /api/analyze`
#[derive(Debug, Clone)]
pub struct AnalyzeClient {
    client: Client,
    endpoint: String,
}

impl AnalyzeClient {
    /// Create a client for the server at `base_url`.
    ///
    /// Without a `timeout` the transport default applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one analysis request. Never retried.
    pub async fn analyze(&self, params: &SearchParams) -> Result<AnalysisResult, AnalyzeError> {
        debug!("POST {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body is handled like an unparsable one.
            let body = response.bytes().await.unwrap_or_default();
            return Err(AnalyzeError::from_status(status, &body));
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes with status {}", body.len(), status);
        Ok(serde_json::from_slice(&body)?)
    }
}
