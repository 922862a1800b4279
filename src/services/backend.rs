use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;

/// Why a health check failed. Display strings double as the browser-facing
/// messages, so they stay human-readable.
#[derive(Debug, Error)]
pub enum HealthCheckError {
    #[error("Backend responded with status: {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),
}

/// Thin client for the backend origin's health API. One best-effort GET per
/// call; no retries, no timeout beyond the transport default.
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Forward a GET to `{base}/api/health`. A 2xx JSON body is returned
    /// untouched; everything else maps into [`HealthCheckError`] without
    /// reading the upstream body.
    pub async fn check_health(&self) -> Result<Value, HealthCheckError> {
        let url = format!("{}/api/health", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(HealthCheckError::Status(response.status().as_u16()));
        }

        response.json::<Value>().await.map_err(transport_error)
    }
}

fn transport_error(err: reqwest::Error) -> HealthCheckError {
    if err.is_connect() {
        HealthCheckError::Transport("Failed to connect to backend".to_string())
    } else {
        HealthCheckError::Transport(err.to_string())
    }
}
