//! Upstream quote provider client.
//!
//! # Responsibilities
//! - Issue exactly one GET to the provider per call
//! - Bound the whole exchange (connect, status, body) by the caller's deadline
//! - Decode the body into a `Quote`
//!
//! # Design Decisions
//! - One shared `reqwest::Client` so connections are pooled across requests
//! - Causes are kept apart for logging; callers treat every variant alike
//! - No retries here or anywhere upstream of it

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::quoting::types::{DecodeError, Quote};
use crate::resilience::{Deadline, DeadlineExceeded};

/// The upstream fetch did not yield a quote.
#[derive(Debug, Error)]
pub enum UpstreamFetchError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream body rejected: {0}")]
    Decode(#[from] DecodeError),

    #[error("upstream fetch timed out: {0}")]
    Timeout(#[from] DeadlineExceeded),
}

impl UpstreamFetchError {
    /// Short label used for metrics.
    pub fn cause(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Client for the upstream quote provider.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Create a client with a fresh HTTP connection pool.
    pub fn new(config: UpstreamConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client on top of an existing `reqwest::Client`.
    pub fn with_http_client(config: UpstreamConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Fetch and decode one quote before `deadline`.
    pub async fn fetch(&self, deadline: Deadline) -> Result<Quote, UpstreamFetchError> {
        let quote = deadline.run(self.fetch_once()).await??;

        tracing::debug!(
            pair = %self.config.pair_code,
            bid = %quote.bid(),
            remaining_ms = deadline.remaining().as_millis() as u64,
            "Upstream quote fetched"
        );
        Ok(quote)
    }

    async fn fetch_once(&self) -> Result<Quote, UpstreamFetchError> {
        let response = self.http.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(Quote::decode(&body, &self.config.pair_code)?)
    }
}
