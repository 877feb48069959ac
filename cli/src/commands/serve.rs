use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use netlens_common::config::Config;
use netlens_core::diagnostics::DiagnosticService;
use netlens_core::executor::SystemProbeExecutor;
use netlens_core::locator::IpApiLocator;
use netlens_core::system;
use tracing::info;

use crate::server;

pub async fn serve(addr: SocketAddr, cfg: Config) -> anyhow::Result<()> {
    system::warn_if_unprivileged(cfg.platform);
    info!("Detected platform: {}", cfg.platform);

    let service: Arc<DiagnosticService> = Arc::new(build_service(cfg)?);
    let router = server::create_router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router).await.context("serving http")?;
    Ok(())
}

/// Wires the host executor and the configured lookup service.
pub fn build_service(cfg: Config) -> anyhow::Result<DiagnosticService> {
    let locator = Arc::new(IpApiLocator::from_config(&cfg)?);
    Ok(DiagnosticService::new(Box::new(SystemProbeExecutor), locator, cfg))
}
