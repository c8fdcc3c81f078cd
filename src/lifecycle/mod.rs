//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Connect backend pool → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → In-flight tasks drain → Exit
//!
//! Signals (signals.rs):
//!     ctrl-c → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Backend pool connects before the listener binds (traffic only when
//!   the pool is ready)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::StartupError;
