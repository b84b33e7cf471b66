//! Helpdesk API - Main Entry Point

use anyhow::Context;
use helpdesk_api::{build_router, AppState, ServiceConfig};
use helpdesk_support::Snapshot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Helpdesk API v{}", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::from_env();
    config.validate()?;

    let snapshot = match &config.seed_path {
        Some(path) => Snapshot::load(path).with_context(|| format!("loading seed snapshot {path}"))?,
        None => Snapshot::default(),
    };

    let app = build_router(AppState::in_memory(snapshot, &config));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
