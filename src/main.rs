//! Linkshelf: a self-hosted bookmark shelf.
//!
//! Entry point: loads configuration, prepares the link document and serves
//! the HTTP API until interrupted.

use linkshelf::api;
use linkshelf::app::App;
use linkshelf::services::config_engine::ConfigEngine;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linkshelf=info,tower_http=info")),
        )
        .init();

    let config = ConfigEngine::from_env()?;
    let bind_addr = config.bind_addr.clone();

    let app = App::new(config)?;
    app.startup().await?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {}", bind_addr, e))?;

    tokio::select! {
        result = api::serve(app, listener) => result?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }
    Ok(())
}
