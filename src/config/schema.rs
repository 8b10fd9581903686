//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the quote
//! service and its requestor. All types derive Serde traits for
//! deserialization from config files, and every field has a default so an
//! empty file yields a working setup.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration shared by the quote service and the requestor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct QuoteConfig {
    /// Listener configuration (bind address, endpoint path).
    pub listener: ListenerConfig,

    /// Upstream quote provider.
    pub upstream: UpstreamConfig,

    /// Deadline budgets for each tier of the pipeline.
    pub timeouts: TimeoutConfig,

    /// Persistence store settings.
    pub storage: StorageConfig,

    /// Requestor settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path of the quote endpoint.
    pub path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            path: "/cotacao".to_string(),
        }
    }
}

/// Upstream quote provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL answering GET with the quote envelope.
    pub url: String,

    /// Key of the currency pair inside the response body (e.g., "USDBRL").
    pub pair_code: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://economia.awesomeapi.com.br/json/last/USD-BRL".to_string(),
            pair_code: "USDBRL".to_string(),
        }
    }
}

/// Deadline budgets, in milliseconds.
///
/// `request_ms` bounds the whole pipeline. `fetch_ms` and `persist_ms` are
/// carved out of it; see `validation` for the nesting rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Outer budget for one inbound request.
    pub request_ms: u64,

    /// Budget for the upstream fetch.
    pub fetch_ms: u64,

    /// Budget for the persistence write.
    pub persist_ms: u64,
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }

    pub fn fetch(&self) -> Duration {
        Duration::from_millis(self.fetch_ms)
    }

    pub fn persist(&self) -> Duration {
        Duration::from_millis(self.persist_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_ms: 300,
            fetch_ms: 200,
            persist_ms: 10,
        }
    }
}

/// Persistence store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite connection string (e.g., "sqlite://cotacao.db", "sqlite::memory:").
    pub database_url: String,

    /// Table receiving quote observations.
    pub table: String,

    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://cotacao.db".to_string(),
            table: "cotacoes".to_string(),
            max_connections: 5,
        }
    }
}

/// Requestor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Quote service endpoint.
    pub server_url: String,

    /// Deadline for the single outbound call, in milliseconds.
    pub timeout_ms: u64,

    /// File overwritten with the bid on every successful run.
    pub output_path: String,

    /// Label written before the bid.
    pub label: String,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/cotacao".to_string(),
            timeout_ms: 300,
            output_path: "cotacao.txt".to_string(),
            label: "Dólar".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
