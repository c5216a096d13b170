//! Registered instance view and liveness rule.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Point-in-time view of a registered backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStatus {
    /// Address the backend registered with (e.g. `http://storage1:9999`).
    pub address: String,
    /// Whether the last registration or heartbeat is within the TTL.
    pub alive: bool,
}

/// An instance is alive while `now - last_seen <= ttl`.
pub(crate) fn is_alive(last_seen: Instant, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(last_seen) <= ttl
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_boundary_is_inclusive() {
        let seen = Instant::now();
        let ttl = Duration::from_millis(100);

        assert!(is_alive(seen, seen, ttl));
        assert!(is_alive(seen, seen + ttl, ttl));
        assert!(!is_alive(seen, seen + ttl + Duration::from_nanos(1), ttl));
    }

    #[test]
    fn test_serializes_address_and_alive() {
        let status = InstanceStatus { address: "http://a:1".into(), alive: true };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json, serde_json::json!({"address": "http://a:1", "alive": true}));
    }
}
