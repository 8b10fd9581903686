//! Deadline cascade for one quote request.
//!
//! ```text
//! D0 request deadline (handler)
//! ├── D1 = D0.child(fetch)    upstream fetch    critical: failure aborts
//! └── D2 = D0.child(persist)  store append      best effort: failure logged
//! ```
//!
//! D2 is derived from D0 once the fetch is done, never from what is left
//! of D1. Both children are clamped to D0.

use crate::config::TimeoutConfig;
use crate::observability::metrics;
use crate::persistence::QuoteStore;
use crate::quoting::types::Quote;
use crate::resilience::Deadline;
use crate::upstream::{UpstreamClient, UpstreamFetchError};

/// Result of a pipeline run whose fetch succeeded.
#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    quote: Quote,
    record_id: Option<i64>,
}

impl CascadeOutcome {
    /// Bid value to hand back to the caller, verbatim.
    pub fn bid(&self) -> &str {
        self.quote.bid()
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Row id of the persisted copy, `None` when the write was shed.
    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }
}

/// Runs fetch then persist under nested deadlines.
#[derive(Clone)]
pub struct QuoteEngine {
    upstream: UpstreamClient,
    store: QuoteStore,
    timeouts: TimeoutConfig,
}

impl QuoteEngine {
    pub fn new(upstream: UpstreamClient, store: QuoteStore, timeouts: TimeoutConfig) -> Self {
        Self {
            upstream,
            store,
            timeouts,
        }
    }

    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    /// Run the pipeline inside `request`.
    ///
    /// Only an upstream failure is returned as an error; in that case the
    /// store is never touched.
    pub async fn run(&self, request: Deadline) -> Result<CascadeOutcome, UpstreamFetchError> {
        let fetch_deadline = request.child(self.timeouts.fetch());
        let quote = match self.upstream.fetch(fetch_deadline).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::error!(
                    cause = e.cause(),
                    error = %e,
                    url = %self.upstream.url(),
                    budget_ms = fetch_deadline.budget().as_millis() as u64,
                    "Upstream fetch failed"
                );
                metrics::record_upstream_failure(e.cause());
                return Err(e);
            }
        };

        let persist_deadline = request.child(self.timeouts.persist());
        let record_id = match self.store.append(&quote, persist_deadline).await {
            Ok(id) => {
                tracing::debug!(record_id = id, "Quote persisted");
                metrics::record_persisted();
                Some(id)
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    error = %e,
                    budget_ms = persist_deadline.budget().as_millis() as u64,
                    "Failed to persist quote"
                );
                metrics::record_persistence_failure(e.kind());
                None
            }
        };

        Ok(CascadeOutcome { quote, record_id })
    }
}
