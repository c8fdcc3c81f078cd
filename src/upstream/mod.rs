//! Backend transport subsystem.
//!
//! # Responsibilities
//! - Open a persistent byte-stream connection to each backend at startup
//! - Re-open a dropped connection on demand
//! - Serialize send/receive pairs per backend
//!
//! # Design Decisions
//! - One persistent connection per backend, guarded by its own async mutex:
//!   two requests assigned to the same backend never interleave their
//!   send/receive pairs on the shared stream
//! - Startup connect failure is fatal; on-demand reconnect failure is
//!   handled by the per-request retry path

pub mod session;

pub use session::{BackendSession, SessionError};
