//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry, gateway, HTTP handlers, registration agent
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request span
//! - Metrics are cheap atomic updates and no-ops without an exporter

pub mod logging;
pub mod metrics;
