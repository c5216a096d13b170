//! Service registry subsystem.
//!
//! # Data Flow
//! ```text
//! Backend process
//!     → POST /register, POST /heartbeat (internal API)
//!     → service.rs (address → last_seen, rotation cursor)
//!
//! Inbound /data request
//!     → gateway asks service.rs for next_instance()
//!     → instance.rs liveness rule filters the alive subset
//!     → round-robin over the alive subset, sorted by address
//! ```
//!
//! # Design Decisions
//! - Liveness is derived from elapsed time on every read, never stored
//! - Dead entries are never evicted; they stay visible in status()
//! - The rotation cursor is positional: membership churn changes which
//!   address a given cursor value points to

pub mod instance;
pub mod service;

pub use instance::InstanceStatus;
pub use service::ServiceRegistry;
