//! Backend registry.
//!
//! # Responsibilities
//! - Represent the fixed pool of backend servers
//! - Track each backend's decaying outstanding-work estimate
//! - Guard all load state behind a single exclusive lock
//!
//! The registry is the only shared mutable state in the balancer. Entries
//! are created at startup and live for the process lifetime; references to
//! individual entries never escape the lock.

use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use crate::config::ServiceClass;

/// A single backend server and its load-estimate state.
#[derive(Debug)]
pub struct Backend {
    /// Network location, fixed at startup.
    pub addr: SocketAddr,
    /// Service class this backend specializes in.
    pub class: ServiceClass,
    /// Seconds of outstanding work estimated for this backend. Never
    /// negative: it grows only on assignment and shrinks only by decay.
    expected_load: f64,
    /// When `expected_load` was last recalculated.
    last_update: Instant,
}

impl Backend {
    fn new(addr: SocketAddr, class: ServiceClass) -> Self {
        Self {
            addr,
            class,
            expected_load: 0.0,
            last_update: Instant::now(),
        }
    }

    /// Current outstanding-work estimate in seconds.
    pub fn expected_load(&self) -> f64 {
        self.expected_load
    }

    /// Drain the estimate linearly by the wall time elapsed since the last
    /// recalculation, flooring at zero.
    pub(crate) fn decay_to(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_update).as_secs_f64();
        self.expected_load = (self.expected_load - elapsed).max(0.0);
        self.last_update = now;
    }

    /// Record an assignment that raises the estimate to `committed`.
    pub(crate) fn commit(&mut self, committed: f64, now: Instant) {
        self.expected_load = committed;
        self.last_update = now;
    }

    #[cfg(test)]
    pub(crate) fn rewind_last_update(&mut self, by: std::time::Duration) {
        self.last_update -= by;
    }
}

/// The shared, lock-guarded backend pool.
#[derive(Debug)]
pub struct BackendRegistry {
    entries: Mutex<Vec<Backend>>,
}

impl BackendRegistry {
    /// Build a registry from the ordered backend list. Iteration order is
    /// the configured order; ties in selection break toward lower indices.
    pub fn new(backends: impl IntoIterator<Item = (SocketAddr, ServiceClass)>) -> Self {
        let entries = backends
            .into_iter()
            .map(|(addr, class)| Backend::new(addr, class))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Number of configured backends.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no backends are configured.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of every backend's current expected load, in index order.
    pub fn snapshot_loads(&self) -> Vec<f64> {
        self.lock().iter().map(Backend::expected_load).collect()
    }

    /// Take the registry lock. A poisoned lock means another selection pass
    /// panicked; the load state is still structurally valid, so recover it.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<Backend>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
