//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Validated request
//!     → registry.rs (shared backend pool behind one lock)
//!     → estimator.rs:
//!         - decay every backend's outstanding-work estimate to now
//!         - weight the request against each backend's class affinity
//!         - pick the minimum projected finish time (lowest index on ties)
//!         - commit the winner's new expected load
//!     → Assignment (backend index, address, committed load)
//! ```
//!
//! # Design Decisions
//! - One exclusive lock covers the entire decay-select-commit pass, so
//!   concurrent requests never observe a partial update
//! - The lock is held only for the O(backends) pass, never across I/O
//! - Assignment is greedy and online: no lookahead, no rebalancing, and no
//!   rollback when a forwarded request later fails

pub mod estimator;
pub mod registry;

pub use estimator::Assignment;
pub use registry::{Backend, BackendRegistry};
