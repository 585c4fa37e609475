//! Provisioning backend client
//!
//! One bearer-authenticated POST per config request, bounded by the
//! configured timeout. At-most-once: any failure is reported to the caller,
//! which substitutes a synthesized config instead of retrying.

use crate::config::BackendConfig;
use thiserror::Error;
use tracing::debug;
use tunnel_forge_proto::ConfigRequest;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("malformed backend response: {0}")]
    Malformed(&'static str),
}

pub struct BackendClient {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl BackendClient {
    /// Wrap the gateway's shared HTTP client (the request timeout is set on
    /// the client itself).
    pub fn new(http: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            http,
            url: config.url.clone(),
            token: config.token.clone(),
        }
    }

    /// Fetch a config from the provisioning backend. Single attempt.
    ///
    /// The backend's reply must be a JSON object with a non-empty string
    /// `config` field; anything else counts as a failure.
    pub async fn fetch_config(&self, request: &ConfigRequest) -> Result<String, BackendError> {
        debug!("requesting config from backend for {}", request.country);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|_| BackendError::Malformed("body is not JSON"))?;
        let config = body
            .get("config")
            .and_then(|v| v.as_str())
            .ok_or(BackendError::Malformed("missing config field"))?;
        if config.is_empty() {
            return Err(BackendError::Malformed("empty config field"));
        }

        Ok(config.to_string())
    }
}
