//! Single-shot requestor.
//!
//! # Responsibilities
//! - One GET to the quote service under a fixed deadline
//! - Decode the bid from a JSON string body
//! - Overwrite the output file with `"<label>: <bid>"`
//!
//! # Design Decisions
//! - Every failure is terminal for the run; nothing is retried
//! - The file is only touched after a bid was decoded

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::resilience::{Deadline, DeadlineExceeded};

/// The call to the quote service failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Timeout(#[from] DeadlineExceeded),

    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Terminal outcome of a failed run.
#[derive(Debug, Error)]
pub enum RequestorError {
    #[error("failed to fetch quote: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to decode quote: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches the bid once and writes it to disk.
pub struct Requestor {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Requestor {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.config.output_path)
    }

    /// Fetch then write. Returns the path written.
    pub async fn run(&self) -> Result<PathBuf, RequestorError> {
        let bid = self.fetch_bid().await?;
        self.write_output(&bid).await
    }

    /// Ask the quote service for the current bid.
    pub async fn fetch_bid(&self) -> Result<String, RequestorError> {
        let deadline = Deadline::after(self.config.timeout());
        tracing::debug!(
            url = %self.config.server_url,
            timeout_ms = self.config.timeout_ms,
            "Requesting quote"
        );

        let body = deadline
            .run(self.request_body())
            .await
            .map_err(FetchError::from)??;

        let bid: String = serde_json::from_slice(&body)?;
        Ok(bid)
    }

    async fn request_body(&self) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(&self.config.server_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: body.trim().to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Overwrite the output file with the labelled bid.
    pub async fn write_output(&self, bid: &str) -> Result<PathBuf, RequestorError> {
        let path = self.output_path();
        let content = format!("{}: {}", self.config.label, bid);

        tokio::fs::write(&path, content)
            .await
            .map_err(|source| RequestorError::Persist {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), bid = %bid, "Quote written");
        Ok(path)
    }
}
