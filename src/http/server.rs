//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the quote and health handlers
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener and stop on the shutdown signal
//!
//! Each inbound request runs in its own task; handlers share only the engine,
//! whose store pool is safe for concurrent writers. When a client goes away
//! hyper drops the handler future, which cancels any fetch or write still in
//! flight.

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::QuoteConfig;
use crate::http::quote::{get_quote, health};
use crate::http::request::{make_request_span, MakeRequestUuid};
use crate::quoting::QuoteEngine;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: QuoteEngine,
}

/// HTTP server for the quote service.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    config: QuoteConfig,
}

impl HttpServer {
    /// Create a new HTTP server around an engine.
    pub fn new(config: QuoteConfig, engine: QuoteEngine) -> Self {
        let router = Self::build_router(&config, AppState { engine });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &QuoteConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.listener.path, get(get_quote))
            .route("/health", get(health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Router with all layers applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.listener.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }
}
