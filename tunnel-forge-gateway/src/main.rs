//! Tunnel-Forge Gateway binary
//!
//! Serves `POST /api/config` either by proxying to the provisioning backend
//! or by synthesizing a mock profile locally, plus `POST /api/verify` for
//! identity-proof forwarding.
//!
//! Usage:
//!   tforge-gateway --mode proxy --country Finland \
//!       --fallback-endpoint 5.144.179.145:51820
//!
//! Backend credentials come from BACKEND_URL / BACKEND_TOKEN; there are no
//! built-in defaults and the gateway refuses to start without them.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use tunnel_forge_gateway::cli::{Args, Mode};
use tunnel_forge_gateway::config::GatewayConfig;
use tunnel_forge_gateway::routes::{self, AppState};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = GatewayConfig::from_args(&args).map_err(|e| {
        error!("❌ Invalid configuration: {}", e);
        e
    })?;

    let mode = match config.mode {
        Mode::Proxy => "proxy-to-backend",
        Mode::Mock => "local-mock",
    };
    info!("Tunnel-Forge Gateway");
    info!("  mode:      {}", mode);
    info!("  countries: {}", config.countries.join(", "));
    info!("  fallback:  {}", config.fallback_endpoint);
    if config.verifier.app_id.is_none() {
        info!("  verify:    disabled (no app id configured)");
    }

    let state = Arc::new(AppState::new(config)?);

    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("🚀 gateway listening on {}", bind_addr);

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
