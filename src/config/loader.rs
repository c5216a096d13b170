//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
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
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.public.bind_address, "0.0.0.0:8080");
        assert_eq!(config.internal.bind_address, "0.0.0.0:9090");
        assert_eq!(config.registry.ttl_ms, 15_000);
        assert_eq!(config.forward.max_retries, 3);
        assert_eq!(config.forward.request_timeout_ms, 2_000);
        assert_eq!(config.forward.backoff_base_ms, 200);
        assert_eq!(config.shutdown.grace_secs, 5);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
            [registry]
            ttl_ms = 500

            [forward]
            max_retries = 1

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.registry.ttl_ms, 500);
        assert_eq!(config.forward.max_retries, 1);
        assert_eq!(config.forward.backoff_base_ms, 200);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[forward]\nmax_retries = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = parse_config(
            r#"
            [registry]
            ttl_ms = 0

            [forward]
            request_timeout_ms = 0
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
