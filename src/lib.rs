//! holonet — HTTP gateway over a people/films/planets catalog.
//!
//! Callers query a resource collection, or search people by name and get each
//! match back with its homeworld, films, vehicles and starships resolved.
//! This crate wires the workspace layers together; the interesting logic
//! lives in `holonet-core`.
//!
//! # Architecture
//!
//! ```text
//! Gateway ──► Aggregator ──► HttpUpstream ──► catalog
//!                 │
//!                 └──► Enricher ──► HttpUpstream (per reference)
//! ```

use anyhow::Context;
use holonet_core::config::Config;
use holonet_gateway::AppState;
use holonet_upstream::HttpUpstream;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Build the gateway router for `config` without binding anything.
pub fn app(config: &Config) -> anyhow::Result<axum::Router> {
    let upstream = HttpUpstream::new(&config.upstream).context("configuring upstream client")?;
    Ok(holonet_gateway::router(AppState::new(upstream, config.enrichment.fanout())))
}

/// Bind `config.server.bind` and serve until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let app = app(&config)?;
    let listener = TcpListener::bind(config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    let addr: SocketAddr = listener.local_addr()?;

    tracing::info!(
        %addr,
        upstream = %config.upstream.base_url,
        fanout = config.enrichment.fanout(),
        "holonet listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;
    tracing::info!("holonet stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
