//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Public listener (:8080)
//!     → request.rs (x-request-id, trace span)
//!     → public.rs: GET /data → gateway.forward → stream upstream response
//!                  GET /status → registry.status → JSON
//!
//! Internal listener (:9090)
//!     → request.rs
//!     → internal.rs: POST /register, POST /heartbeat, GET /healthz
//! ```

pub mod internal;
pub mod public;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{internal_router, public_router, AppState, HttpServer};
