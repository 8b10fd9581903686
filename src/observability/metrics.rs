//! Metrics collection and exposition.
//!
//! # Metrics
//! - `quote_requests_total` (counter): inbound requests by outcome
//! - `quote_request_duration_seconds` (histogram): end-to-end latency
//! - `quote_upstream_failures_total` (counter): failed fetches by cause
//! - `quote_persistence_failures_total` (counter): failed appends by kind
//! - `quote_persisted_total` (counter): quotes written to the store
//!
//! # Design Decisions
//! - Recording is always on; exposition only when configured
//! - Label values are static strings to keep cardinality fixed

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record a finished inbound request.
pub fn record_request(outcome: &'static str, start: Instant) {
    counter!("quote_requests_total", "outcome" => outcome).increment(1);
    histogram!("quote_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_failure(cause: &'static str) {
    counter!("quote_upstream_failures_total", "cause" => cause).increment(1);
}

pub fn record_persistence_failure(kind: &'static str) {
    counter!("quote_persistence_failures_total", "kind" => kind).increment(1);
}

pub fn record_persisted() {
    counter!("quote_persisted_total").increment(1);
}
