//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept, bounded by semaphore permits)
//!     → (stream, peer address, permit) handed to the acceptor loop
//! ```
//!
//! # Design Decisions
//! - A semaphore caps concurrently in-flight connections; the permit is
//!   released when the connection's task finishes
//! - Bind failures are fatal; accept failures are reported per call

pub mod listener;

pub use listener::{ConnectionPermit, Listener, ListenerError};
