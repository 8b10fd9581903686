//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order (store, upstream, engine)
//! - Start the metrics exporter when enabled
//! - Hand back a server ready to be bound
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The store is provisioned before traffic is accepted

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::QuoteConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::persistence::{PersistenceError, QuoteStore};
use crate::quoting::QuoteEngine;
use crate::upstream::UpstreamClient;

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("quote store unavailable: {0}")]
    Store(#[from] PersistenceError),

    #[error("invalid metrics address {0}")]
    MetricsAddress(String),
}

/// Build every subsystem and return the HTTP server.
pub async fn bootstrap(config: QuoteConfig) -> Result<HttpServer, StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| {
                StartupError::MetricsAddress(config.observability.metrics_address.clone())
            })?;
        metrics::init_metrics(addr);
    }

    let store = QuoteStore::connect(&config.storage).await?;
    match store.count().await {
        Ok(count) => tracing::info!(stored_quotes = count, "Quote store opened"),
        Err(e) => tracing::warn!(error = %e, "Could not count stored quotes"),
    }

    let upstream = UpstreamClient::new(config.upstream.clone());
    let engine = QuoteEngine::new(upstream, store, config.timeouts.clone());

    Ok(HttpServer::new(config, engine))
}
