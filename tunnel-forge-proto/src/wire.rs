//! JSON bodies exchanged with gateway clients
//!
//! Field casing follows the consumer UI (camelCase).

use crate::{ConfigSource, ProtocolKind};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRequest {
    /// Country selector, matched against the gateway's allow-list
    pub country: String,
    /// Protocol selector; unknown or missing values resolve to wireguard
    #[serde(default)]
    pub protocol: Option<String>,
    /// Opaque caller identity
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Successful reply to `POST /api/config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub status: u16,
    pub country: String,
    pub protocol: ProtocolKind,
    /// Whether the config came from the provider or the local synthesizer
    pub source: ConfigSource,
    pub config: String,
}

/// Error reply shared by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

/// Body of `POST /api/verify`: an identity-proof payload to forward to the
/// third-party verifier. The proof itself stays opaque to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub payload: serde_json::Value,
    pub action: String,
    #[serde(default)]
    pub signal: Option<String>,
}

/// Reply to `POST /api/verify`, wrapping the verifier's own response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub status: u16,
    pub verify_res: serde_json::Value,
}
