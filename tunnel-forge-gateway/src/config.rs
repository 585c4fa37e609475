//! Gateway configuration
//!
//! All secrets and endpoints are supplied from flags or the environment.
//! Nothing here carries a compiled-in fallback: a missing required value is
//! a startup error, not a placeholder default.

use crate::cli::{Args, Mode};
use std::time::Duration;
use thiserror::Error;
use tunnel_forge_proto::ServerEndpoint;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--backend-url (or BACKEND_URL) is required in proxy mode")]
    MissingBackendUrl,

    #[error("--backend-token (or BACKEND_TOKEN) is required in proxy mode")]
    MissingBackendToken,

    #[error("--fallback-endpoint (or FALLBACK_ENDPOINT) is required, as host:port")]
    MissingFallbackEndpoint,

    #[error("invalid fallback endpoint: {0}")]
    InvalidFallbackEndpoint(#[from] tunnel_forge_proto::ProtoError),

    #[error("at least one --country is required")]
    NoCountries,

    #[error("--verify-app-id is set but --verifier-url (or VERIFIER_URL) is missing")]
    MissingVerifierUrl,
}

/// Provisioning backend connection settings.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub token: String,
}

/// Third-party identity verifier settings. The app id may be absent, in
/// which case the verify endpoint refuses to serve.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub base_url: Option<String>,
    pub app_id: Option<String>,
}

/// Validated gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub mode: Mode,
    /// Present in proxy mode only
    pub backend: Option<BackendConfig>,
    pub backend_timeout: Duration,
    /// Endpoint advertised in synthesized configs
    pub fallback_endpoint: ServerEndpoint,
    /// Country allow-list, matched case-insensitively
    pub countries: Vec<String>,
    pub verifier: VerifierConfig,
}

impl GatewayConfig {
    /// Build and validate the configuration. Fails closed: every value a
    /// mode needs must be present, or the gateway refuses to start.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.countries.is_empty() {
            return Err(ConfigError::NoCountries);
        }

        let endpoint_str = args
            .fallback_endpoint
            .as_deref()
            .ok_or(ConfigError::MissingFallbackEndpoint)?;
        let mut fallback_endpoint = ServerEndpoint::from_host_port(endpoint_str)?;
        if let Some(sni) = &args.tls_server_name {
            fallback_endpoint = fallback_endpoint.with_tls_server_name(sni);
        }

        let backend = match args.mode {
            Mode::Proxy => {
                let url = args
                    .backend_url
                    .clone()
                    .ok_or(ConfigError::MissingBackendUrl)?;
                let token = args
                    .backend_token
                    .clone()
                    .ok_or(ConfigError::MissingBackendToken)?;
                Some(BackendConfig { url, token })
            }
            Mode::Mock => None,
        };

        if args.verify_app_id.is_some() && args.verifier_url.is_none() {
            return Err(ConfigError::MissingVerifierUrl);
        }

        Ok(Self {
            mode: args.mode,
            backend,
            backend_timeout: Duration::from_secs(args.backend_timeout),
            fallback_endpoint,
            countries: args.countries.clone(),
            verifier: VerifierConfig {
                base_url: args.verifier_url.clone(),
                app_id: args.verify_app_id.clone(),
            },
        })
    }

    /// Case-insensitive allow-list check.
    pub fn supports_country(&self, country: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country.trim()))
    }
}
