//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check deadline nesting: fetch inside request, persist inside what is left
//! - Validate URLs and identifiers interpolated into SQL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: QuoteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::QuoteConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.fetch_ms ({fetch_ms}) must be shorter than timeouts.request_ms ({request_ms})")]
    FetchExceedsRequest { fetch_ms: u64, request_ms: u64 },

    #[error("timeouts.persist_ms ({persist_ms}) must be shorter than the {remaining_ms}ms left after the fetch")]
    PersistExceedsRemaining { persist_ms: u64, remaining_ms: u64 },

    #[error("{field} is not an absolute http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("storage.table is not a plain SQL identifier: {0}")]
    InvalidTable(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("listener.path must start with '/': {0}")]
    InvalidPath(String),

    #[error("storage.max_connections must be at least 1")]
    NoConnections,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &QuoteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_timeouts(config, &mut errors);

    check_url("upstream.url", &config.upstream.url, &mut errors);
    check_url("client.server_url", &config.client.server_url, &mut errors);

    if !is_identifier(&config.storage.table) {
        errors.push(ValidationError::InvalidTable(config.storage.table.clone()));
    }
    if config.storage.max_connections == 0 {
        errors.push(ValidationError::NoConnections);
    }

    if config.upstream.pair_code.trim().is_empty() {
        errors.push(ValidationError::Empty("upstream.pair_code"));
    }
    if config.client.label.trim().is_empty() {
        errors.push(ValidationError::Empty("client.label"));
    }
    if config.client.output_path.trim().is_empty() {
        errors.push(ValidationError::Empty("client.output_path"));
    }
    if !config.listener.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(config.listener.path.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_timeouts(config: &QuoteConfig, errors: &mut Vec<ValidationError>) {
    let t = &config.timeouts;
    let before = errors.len();

    for (name, value) in [
        ("timeouts.request_ms", t.request_ms),
        ("timeouts.fetch_ms", t.fetch_ms),
        ("timeouts.persist_ms", t.persist_ms),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }
    if config.client.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("client.timeout_ms"));
    }
    if errors.len() > before {
        return;
    }

    if t.fetch_ms >= t.request_ms {
        errors.push(ValidationError::FetchExceedsRequest {
            fetch_ms: t.fetch_ms,
            request_ms: t.request_ms,
        });
        return;
    }

    let remaining_ms = t.request_ms - t.fetch_ms;
    if t.persist_ms >= remaining_ms {
        errors.push(ValidationError::PersistExceedsRemaining {
            persist_ms: t.persist_ms,
            remaining_ms,
        });
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let valid = Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
