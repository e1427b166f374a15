//! `bizdash` server binary.
//!
//! Usage: `bizdash [CONFIG_PATH]`. The configuration defaults to
//! `config/dashboard.yaml`; log filtering follows `RUST_LOG`.

use bizdash::api::{AppState, create_router};
use bizdash::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config/dashboard.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)?;
    info!(config = %config_path, "Configuration loaded");

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let bind_addr = config.server().bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Dashboard API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
