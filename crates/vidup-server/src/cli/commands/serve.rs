//! `vidup serve` – run the HTTP upload server until Ctrl-C.

use anyhow::{Context, Result};
use vidup_core::config::VidupConfig;
use vidup_server::http;

pub async fn run_serve(cfg: &VidupConfig) -> Result<()> {
    let store = cfg.upload_store()?;
    store
        .ensure_root()
        .await
        .with_context(|| format!("failed to prepare upload directory {}", store.root().display()))?;
    tracing::info!(
        upload_dir = %store.root().display(),
        max_file_size_bytes = cfg.max_file_size_bytes,
        "upload store ready"
    );

    let app = http::build_router(store, &cfg.cors_allowed_origins)?;
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening");
    println!("vidup listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
