//! # preschool-server
//!
//! Backend for the PreSchool Chat learning assistant.
//!
//! This binary provides:
//! - **`POST /chat`** answering each message with one canned reply picked by
//!   keyword
//! - **Static mounts** `/videos` and `/files` for lesson videos and documents
//! - **`/health` and `/info`** for probes and client discovery

mod api;
mod config;
mod error;
mod resolver;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Tracing (respects RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,preschool_server=debug")),
        )
        .init();

    info!("Starting PreSchool Chat server v{}", env!("CARGO_PKG_VERSION"));

    // 2. Configuration
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // 3. Static asset directories
    api::prepare_asset_dirs(&config).await?;
    info!(
        videos = %config.videos_dir.display(),
        files = %config.files_dir.display(),
        "Serving static assets"
    );

    let http_addr = config.http_addr;
    let app_state = AppState::new(config);
    info!(
        rules = app_state.resolver.rules().len(),
        base_url = %app_state.config.public_base_url,
        "Reply rules loaded"
    );

    // 4. HTTP server until it fails or Ctrl+C arrives
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
