use anyhow::Context;
use tokio::net::TcpListener;

use common::logger::init_logger;
use telemetry_backend::{config::AppConfig, routes::router, state::AppState};

/// Resolves on Ctrl-C. If the signal handler cannot be installed the server keeps running.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load configuration")?;
    init_logger("telemetry-backend", cfg.json_logs);

    tracing::info!(
        port = cfg.port,
        buffer_capacity = cfg.buffer_capacity,
        default_recent_limit = cfg.default_recent_limit,
        "Starting telemetry backend..."
    );

    let addr = cfg.bind_address();
    let app = router(AppState::new(cfg));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server terminated")?;

    Ok(())
}
