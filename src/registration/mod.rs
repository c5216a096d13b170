//! Backend self-registration.
//!
//! # Data Flow
//! ```text
//! Backend startup
//!     → agent.rs: POST <gateway>/register (fixed delay between attempts)
//!     → 201 Created → heartbeat loop
//!     → POST <gateway>/heartbeat every interval until shutdown
//! ```
//!
//! # Design Decisions
//! - Registration failure after the last attempt is fatal for the backend
//! - Heartbeat failures are logged and retried on the next tick; the
//!   gateway's TTL decides when a silent backend is dead

pub mod agent;

pub use agent::{AgentConfig, RegistrationAgent, RegistrationError};
