//! HTTP routes
//!
//! - `POST /api/config`  - proxy-or-synthesize config handler
//! - `POST /api/verify`  - forward an identity proof to the verifier
//! - `GET  /healthz`     - liveness

use crate::backend::BackendClient;
use crate::cli::Mode;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use tunnel_forge_proto::{
    ConfigRequest, ConfigResponse, ConfigSource, ProtocolKind, UserContext, VerifyRequest,
    VerifyResponse,
};

/// Shared handler state.
pub struct AppState {
    pub config: GatewayConfig,
    backend: Option<BackendClient>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, crate::backend::BackendError> {
        // One client for both the backend and the verifier.
        let http = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()?;
        let backend = config
            .backend
            .as_ref()
            .map(|backend_config| BackendClient::new(http.clone(), backend_config));
        Ok(Self {
            config,
            backend,
            http,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/config", post(get_config))
        .route("/api/verify", post(verify))
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mode = match state.config.mode {
        Mode::Proxy => "proxy",
        Mode::Mock => "mock",
    };
    Json(json!({ "status": "ok", "mode": mode }))
}

/// The config handler. Country gate first, then one backend attempt (proxy
/// mode only), then the synthesizer. A user-visible success is produced for
/// every supported country; mock output is labeled as such.
async fn get_config(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigRequest>,
) -> Result<Json<ConfigResponse>, GatewayError> {
    let country = request.country.trim().to_string();
    if !state.config.supports_country(&country) {
        return Err(GatewayError::UnsupportedCountry);
    }

    let protocol = ProtocolKind::from_str_lossy(request.protocol.as_deref().unwrap_or("wireguard"));

    if let Some(backend) = &state.backend {
        match backend.fetch_config(&request).await {
            Ok(config) => {
                info!("served provider config for {country} ({protocol})");
                return Ok(Json(ConfigResponse {
                    status: 200,
                    country,
                    protocol,
                    source: ConfigSource::Provider,
                    config,
                }));
            }
            Err(e) => {
                warn!("backend unavailable, serving mock config: {e}");
            }
        }
    }

    let user = UserContext::new(request.user_id.as_deref().unwrap_or("anonymous"));
    let document = tunnel_forge_synth::synthesize(
        protocol,
        &state.config.fallback_endpoint,
        &user,
        &country,
    );

    info!("served mock config for {country} ({protocol})");
    Ok(Json(ConfigResponse {
        status: 200,
        country,
        protocol: document.protocol,
        source: document.source,
        config: document.contents,
    }))
}

/// Forward an identity-proof payload to the third-party verifier. The proof
/// is opaque here; the verifier's JSON verdict is passed back as-is.
async fn verify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerifyRequest>,
) -> Result<(StatusCode, Json<VerifyResponse>), GatewayError> {
    let verifier = &state.config.verifier;
    let (base_url, app_id) = match (&verifier.base_url, &verifier.app_id) {
        (Some(base_url), Some(app_id)) => (base_url, app_id),
        _ => return Err(GatewayError::VerifierNotConfigured),
    };

    let url = format!("{}/api/v2/verify/{}", base_url.trim_end_matches('/'), app_id);

    let mut body = match request.payload.as_object() {
        Some(fields) => fields.clone(),
        None => return Err(GatewayError::InvalidProofPayload),
    };
    body.insert("action".to_string(), json!(request.action));
    if let Some(signal) = &request.signal {
        body.insert("signal".to_string(), json!(signal));
    }

    let response = state
        .http
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(GatewayError::VerifierUnreachable)?;

    let verdict_status = if response.status().is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    let verify_res: serde_json::Value = response.json().await.unwrap_or_else(|_| json!({}));

    info!("verifier verdict: {}", verdict_status.as_u16());
    Ok((
        verdict_status,
        Json(VerifyResponse {
            status: verdict_status.as_u16(),
            verify_res,
        }),
    ))
}
