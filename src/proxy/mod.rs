//! Request proxying subsystem.
//!
//! # Data Flow
//! ```text
//! acceptor.rs: accept client → spawn detached task
//!     → handler.rs:
//!         read request → validate (protocol)
//!         → assign backend (balancer)
//!         → exchange with backend (upstream), reconnect-and-retry once
//!         → relay response verbatim to the client
//! ```
//!
//! # Design Decisions
//! - Every failure manifests to the client as a closed connection with no
//!   data; there is no error payload on the wire
//! - Exactly one reconnect-and-retry against the assigned backend, never a
//!   fallback to a different backend
//! - The assignment's load commit is not rolled back on downstream failure

pub mod acceptor;
pub mod handler;

use std::sync::Arc;

use crate::balancer::BackendRegistry;
use crate::upstream::BackendSession;

pub use acceptor::Acceptor;
pub use handler::{handle_connection, ProxyError};

/// Shared state handed to every connection task.
#[derive(Clone, Debug)]
pub struct ProxyState {
    /// Backend pool load state, indexed in configured order.
    pub registry: Arc<BackendRegistry>,
    /// Persistent backend transports, same indexing as the registry.
    pub sessions: Arc<Vec<BackendSession>>,
    /// Read buffer size for client requests.
    pub read_buffer_size: usize,
}
