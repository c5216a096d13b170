//! Forwarding gateway.
//!
//! # Data Flow
//! ```text
//! GET /data
//!     → context.rs (caller deadline + cancellation)
//!     → forward.rs: bound the whole sequence by the request timeout
//!     → registry.next_instance() picks one target
//!     → attempt loop: GET <target>/data
//!         → transport error / 500,502,503,504: back off, retry same target
//!         → anything else: return the response
//!     → error.rs classifies the terminal failure
//! ```
//!
//! # Design Decisions
//! - The target is resolved once per inbound request. Retries hit the same
//!   instance even when it keeps failing; re-resolving per attempt would
//!   change failure isolation and is left as a deliberate policy choice
//! - Retryable statuses are returned untouched once retries are exhausted
//! - Backoff sleeps and in-flight calls both race the deadline

pub mod context;
pub mod error;
pub mod forward;

pub use context::RequestContext;
pub use error::GatewayError;
pub use forward::{build_http_client, ForwardPolicy, Gateway, GatewayBuilder, HttpClient};
