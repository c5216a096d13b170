//! Address registry with TTL liveness and round-robin selection.
//!
//! # Responsibilities
//! - Record registrations and heartbeats (address → last_seen)
//! - Report every known instance with its liveness
//! - Hand out the next alive instance in address order
//!
//! # Concurrency
//! A single `RwLock` guards both the map and the rotation cursor.
//! Writers (`register`, `heartbeat`, `next_instance`) are exclusive;
//! `status` shares the lock with other readers.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::Duration;
use tokio::time::Instant;

use crate::registry::instance::{is_alive, InstanceStatus};

#[derive(Debug, Default)]
struct Inner {
    /// Ordered by address so listing and selection are deterministic.
    services: BTreeMap<String, Instant>,
    /// Position in the alive subset for the next selection.
    cursor: usize,
}

/// Registry of backend instances, created once per process with a fixed TTL.
#[derive(Debug)]
pub struct ServiceRegistry {
    inner: RwLock<Inner>,
    ttl: Duration,
}

impl ServiceRegistry {
    /// Create an empty registry.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Insert or refresh `address`. Re-registering only moves `last_seen`.
    pub fn register(&self, address: &str) {
        let now = Instant::now();
        let mut inner = self.inner.write().expect("registry lock poisoned");
        inner.services.insert(address.to_string(), now);
    }

    /// Refresh `address` if it is known.
    ///
    /// Unknown addresses are ignored (a heartbeat never registers).
    /// Returns whether the address was known.
    pub fn heartbeat(&self, address: &str) -> bool {
        let now = Instant::now();
        let mut inner = self.inner.write().expect("registry lock poisoned");
        match inner.services.get_mut(address) {
            Some(last_seen) => {
                *last_seen = now;
                true
            }
            None => false,
        }
    }

    /// Snapshot of all instances, sorted ascending by address.
    pub fn status(&self) -> Vec<InstanceStatus> {
        let inner = self.inner.read().expect("registry lock poisoned");
        let now = Instant::now();
        inner
            .services
            .iter()
            .map(|(address, last_seen)| InstanceStatus {
                address: address.clone(),
                alive: is_alive(*last_seen, now, self.ttl),
            })
            .collect()
    }

    /// Pick the next alive instance, round-robin in address order.
    ///
    /// Returns `None` when nothing is alive. A cursor left out of range by a
    /// shrinking alive set restarts at the first alive address.
    pub fn next_instance(&self) -> Option<String> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let Inner { services, cursor } = &mut *guard;
        let now = Instant::now();

        let alive: Vec<&String> = services
            .iter()
            .filter(|(_, last_seen)| is_alive(**last_seen, now, self.ttl))
            .map(|(address, _)| address)
            .collect();

        let count = alive.len();
        if count == 0 {
            return None;
        }

        let index = if *cursor >= count { 0 } else { *cursor };
        *cursor = (index + 1) % count;
        Some(alive[index].clone())
    }

    /// Number of registered addresses, alive or not.
    pub fn len(&self) -> usize {
        self.inner.read().expect("registry lock poisoned").services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of addresses currently within the TTL.
    pub fn alive_count(&self) -> usize {
        let inner = self.inner.read().expect("registry lock poisoned");
        let now = Instant::now();
        inner
            .services
            .values()
            .filter(|last_seen| is_alive(**last_seen, now, self.ttl))
            .count()
    }
}
