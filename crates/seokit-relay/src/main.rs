use std::sync::Arc;

use anyhow::{Context, Result};
use seokit_core::fetch::ReqwestTransport;
use seokit_relay::{AppState, RelayConfig, init_tracing, router};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = RelayConfig::from_env()?;
    let transport = if config.accept_invalid_certs {
        ReqwestTransport::accepting_invalid_certs()
    } else {
        ReqwestTransport::new()
    }
    .context("failed to build HTTP client")?;

    let app = router(AppState::new(Arc::new(transport), config.fetch_timeout));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!(
        "Backend server running on http://{}",
        listener.local_addr().context("listener has no local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("relay server failed")?;

    tracing::info!("relay shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
