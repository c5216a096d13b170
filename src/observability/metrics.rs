//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_forward_total` (counter): forwards by outcome and upstream status
//! - `gateway_forward_duration_seconds` (histogram): time spent in forward
//! - `gateway_forward_attempts` (histogram): attempts per forward
//! - `gateway_registry_instances` (gauge): registered instances by state

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the terminal outcome of one forward.
pub fn record_forward(outcome: &'static str, status: Option<u16>, attempts: u32, start: Instant) {
    let status = status.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string());
    counter!("gateway_forward_total", "outcome" => outcome, "status" => status).increment(1);
    histogram!("gateway_forward_duration_seconds").record(start.elapsed().as_secs_f64());
    histogram!("gateway_forward_attempts").record(attempts as f64);
}

/// Publish registry liveness counts.
pub fn record_registry(alive: usize, total: usize) {
    gauge!("gateway_registry_instances", "state" => "alive").set(alive as f64);
    gauge!("gateway_registry_instances", "state" => "dead").set(total.saturating_sub(alive) as f64);
}
