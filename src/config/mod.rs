//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! gateway.toml (optional)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → registry TTL, forward policy, listeners, logging
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the forward policy never changes at runtime
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ForwardConfig, GatewayConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    RegistryConfig, ShutdownConfig,
};
pub use validation::{validate_config, ValidationError};
