//! Terminal forwarding errors.

use thiserror::Error;

/// Errors returned by [`Gateway::forward`](crate::gateway::Gateway::forward).
///
/// Transient failures never show up here; only the outcome of the last
/// attempt crosses the gateway boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP client or registry missing.
    #[error("gateway not configured")]
    NotConfigured,

    /// Registry has no alive instance. Never retried.
    #[error("no available backend")]
    NoBackendAvailable,

    /// Overall request deadline expired.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Caller cancelled the request.
    #[error("request canceled")]
    Canceled,

    /// Backend unreachable after every attempt.
    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// Registered address does not form a valid request URI.
    #[error("invalid target address: {0}")]
    InvalidTarget(String),
}

impl GatewayError {
    /// True for deadline expiry and caller cancellation.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::DeadlineExceeded | GatewayError::Canceled)
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotConfigured => "not_configured",
            GatewayError::NoBackendAvailable => "no_backend",
            GatewayError::DeadlineExceeded => "deadline_exceeded",
            GatewayError::Canceled => "canceled",
            GatewayError::Transport(_) => "transport",
            GatewayError::InvalidTarget(_) => "invalid_target",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        assert!(GatewayError::DeadlineExceeded.is_timeout());
        assert!(GatewayError::Canceled.is_timeout());
        assert!(!GatewayError::NoBackendAvailable.is_timeout());
        assert!(!GatewayError::NotConfigured.is_timeout());
        assert!(!GatewayError::InvalidTarget("x".into()).is_timeout());
    }
}
