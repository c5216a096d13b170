//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (TTL, timeouts and backoff > 0)
//! - Validate listener addresses and detect collisions
//!
//! Returns every problem found, not just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a [`GatewayConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a socket address, got {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("public and internal listeners share {0}")]
    ListenerCollision(String),
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let addresses = [
        ("public.bind_address", &config.public.bind_address),
        ("internal.bind_address", &config.internal.bind_address),
        ("observability.metrics_address", &config.observability.metrics_address),
    ];
    for (field, value) in addresses {
        if value.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            });
        }
    }

    if config.public.bind_address == config.internal.bind_address {
        errors.push(ValidationError::ListenerCollision(
            config.public.bind_address.clone(),
        ));
    }

    let durations = [
        ("registry.ttl_ms", config.registry.ttl_ms),
        ("forward.request_timeout_ms", config.forward.request_timeout_ms),
        ("forward.backoff_base_ms", config.forward.backoff_base_ms),
        ("forward.connect_timeout_ms", config.forward.connect_timeout_ms),
    ];
    for (field, value) in durations {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_invalid_address() {
        let mut config = GatewayConfig::default();
        config.public.bind_address = "localhost".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "public.bind_address",
                value: "localhost".into(),
            }]
        );
    }

    #[test]
    fn test_listener_collision() {
        let mut config = GatewayConfig::default();
        config.internal.bind_address = config.public.bind_address.clone();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ListenerCollision("0.0.0.0:8080".into())));
    }

    #[test]
    fn test_zero_backoff_rejected() {
        let mut config = GatewayConfig::default();
        config.forward.backoff_base_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Zero { field: "forward.backoff_base_ms" }]);
    }

    #[test]
    fn test_zero_retries_allowed() {
        let mut config = GatewayConfig::default();
        config.forward.max_retries = 0;
        assert!(validate_config(&config).is_ok());
    }
}
