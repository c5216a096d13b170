//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound attempt to a backend:
//!     → retries.rs (classify outcome: retryable status or terminal)
//!     → backoff.rs (delay before the next attempt)
//!     → gateway loop sleeps, bounded by the request deadline
//! ```
//!
//! # Design Decisions
//! - Network errors are always retryable; only 500/502/503/504 statuses are
//! - Backoff grows geometrically with no cap and no jitter
//! - The overall request deadline is the only bound on retry latency

pub mod backoff;
pub mod retries;

pub use backoff::{Backoff, BACKOFF_MULTIPLIER};
pub use retries::{is_retryable_status, RETRYABLE_STATUSES};
