//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Public API listener (`/data`, `/status`).
    pub public: ListenerConfig,

    /// Internal API listener (`/register`, `/heartbeat`, `/healthz`).
    pub internal: ListenerConfig,

    /// Service registry settings.
    pub registry: RegistryConfig,

    /// Forwarding and retry settings.
    pub forward: ForwardConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,

    /// Graceful shutdown.
    pub shutdown: ShutdownConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            public: ListenerConfig::new("0.0.0.0:8080"),
            internal: ListenerConfig::new("0.0.0.0:9090"),
            registry: RegistryConfig::default(),
            forward: ForwardConfig::default(),
            observability: ObservabilityConfig::default(),
            shutdown: ShutdownConfig::default(),
        }
    }
}

/// Listener configuration. A listener section must name its address.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl ListenerConfig {
    pub fn new(bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum gap since the last heartbeat before an instance is dead.
    pub ttl_ms: u64,
}

impl RegistryConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { ttl_ms: 15_000 }
    }
}

/// Forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Deadline for the whole retry sequence in milliseconds.
    pub request_timeout_ms: u64,

    /// First backoff delay in milliseconds (grows by 1.7x per retry).
    pub backoff_base_ms: u64,

    /// TCP connect timeout for outbound calls in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            request_timeout_ms: 2_000,
            backoff_base_ms: 200,
            connect_timeout_ms: 3_000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9100".to_string(),
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Time allowed for in-flight requests to drain.
    pub grace_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_secs: 5 }
    }
}

impl ShutdownConfig {
    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_secs)
    }
}
