use clap::{Parser, ValueEnum};

/// Operating mode
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Proxy config requests to the provisioning backend, fall back to
    /// synthesized configs when it is unreachable
    #[value(name = "proxy")]
    Proxy,
    /// Serve synthesized configs only, never contact a backend
    #[value(name = "mock")]
    Mock,
}

/// Tunnel-Forge Gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "tforge-gateway")]
#[command(version = "0.1.0")]
#[command(about = "VPN config provisioning gateway with mock fallback", long_about = None)]
pub struct Args {
    /// Operating mode: proxy (backend with fallback) or mock (local only)
    #[arg(short, long, value_enum, default_value_t = Mode::Proxy)]
    pub mode: Mode,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Listen port
    #[arg(short, long, default_value_t = 8787)]
    pub port: u16,

    /// Provisioning backend URL (required in proxy mode, no built-in default)
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Bearer token for the provisioning backend (required in proxy mode)
    #[arg(long, env = "BACKEND_TOKEN", hide_env_values = true)]
    pub backend_token: Option<String>,

    /// Backend request timeout in seconds (single attempt, no retry)
    #[arg(long, default_value_t = 5)]
    pub backend_timeout: u64,

    /// Endpoint advertised in synthesized configs, as host:port
    #[arg(long, env = "FALLBACK_ENDPOINT")]
    pub fallback_endpoint: Option<String>,

    /// TLS server name for synthesized configs (defaults to the endpoint host)
    #[arg(long)]
    pub tls_server_name: Option<String>,

    /// Supported country (repeatable); requests outside the list are rejected
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// Identity verifier base URL
    #[arg(long, env = "VERIFIER_URL")]
    pub verifier_url: Option<String>,

    /// App identifier registered with the verifier; /api/verify refuses to
    /// serve while this is unset
    #[arg(long, env = "VERIFY_APP_ID", hide_env_values = true)]
    pub verify_app_id: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
