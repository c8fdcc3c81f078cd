//! Greedy load estimation.
//!
//! For every incoming request the estimator decays all backends' estimates
//! to "now", projects the request's weighted finish time on each backend and
//! commits the minimum. The commit happens at assignment time and is never
//! rolled back, even if forwarding to the chosen backend later fails.

use std::net::SocketAddr;
use std::time::Instant;

use crate::balancer::registry::BackendRegistry;
use crate::config::ServiceClass;
use crate::protocol::{Category, Request};

/// The outcome of one selection pass.
#[derive(Debug, Clone, Copy)]
pub struct Assignment {
    /// Index of the chosen backend in configured order.
    pub backend: usize,
    /// Address of the chosen backend.
    pub addr: SocketAddr,
    /// Class of the chosen backend.
    pub class: ServiceClass,
    /// The backend's expected load after taking this request, in seconds.
    pub expected_load: f64,
}

/// Cost multiplier for running a request category on a backend class.
/// Same-affinity work is cheapest; cross-affinity work pays a penalty.
pub(crate) fn weight(category: Category, class: ServiceClass) -> f64 {
    match (class, category) {
        (ServiceClass::Video, Category::Music) => 2.0,
        (ServiceClass::Video, Category::Video) => 1.0,
        (ServiceClass::Video, Category::Premium) => 1.0,
        (ServiceClass::Music, Category::Music) => 1.0,
        (ServiceClass::Music, Category::Video) => 3.0,
        (ServiceClass::Music, Category::Premium) => 2.0,
    }
}

impl BackendRegistry {
    /// Atomically select the backend with the smallest projected finish time
    /// for `request` and commit its new expected load.
    ///
    /// The whole pass runs under the registry lock: decay every backend,
    /// compute `expected_load + duration * weight` per backend, take the
    /// strict minimum with ties broken by lowest index. Returns `None` only
    /// for an empty registry.
    pub fn assign(&self, request: &Request) -> Option<Assignment> {
        let mut entries = self.lock();
        if entries.is_empty() {
            return None;
        }

        let now = Instant::now();
        for backend in entries.iter_mut() {
            backend.decay_to(now);
        }

        let duration = f64::from(request.duration);
        let mut best_index = 0;
        let mut best_candidate = f64::INFINITY;
        for (index, backend) in entries.iter().enumerate() {
            let candidate =
                backend.expected_load() + duration * weight(request.category, backend.class);
            if candidate < best_candidate {
                best_index = index;
                best_candidate = candidate;
            }
        }

        let chosen = &mut entries[best_index];
        chosen.commit(best_candidate, now);

        Some(Assignment {
            backend: best_index,
            addr: chosen.addr,
            class: chosen.class,
            expected_load: best_candidate,
        })
    }
}
