//! Service gateway library.
//!
//! Tracks backend instances through registration and heartbeats, and
//! forwards `/data` requests to a live instance with retries.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registration;
pub mod registry;
pub mod resilience;

pub use config::GatewayConfig;
pub use gateway::{Gateway, GatewayError, RequestContext};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::ServiceRegistry;
