//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::QuoteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<QuoteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<QuoteConfig, ConfigError> {
    let config: QuoteConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from `path` when given, otherwise fall back to validated defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<QuoteConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = QuoteConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_document() {
        let config = parse_config(
            r#"
            [upstream]
            url = "http://127.0.0.1:9000/json/last/USD-BRL"

            [timeouts]
            request_ms = 500
            fetch_ms = 400
            persist_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.url, "http://127.0.0.1:9000/json/last/USD-BRL");
        assert_eq!(config.timeouts.request_ms, 500);
    }

    #[test]
    fn test_nesting_violation_is_config_error() {
        let err = parse_config(
            r#"
            [timeouts]
            request_ms = 300
            fetch_ms = 250
            persist_ms = 60
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_malformed_toml() {
        let err = parse_config("[timeouts\nrequest_ms = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here/fx-quote.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_defaults_without_path() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config.storage.table, "cotacoes");
    }
}
