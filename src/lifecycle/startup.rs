//! Startup orchestration.
//!
//! # Responsibilities
//! - Connect to every configured backend, in order
//! - Assemble the shared proxy state
//!
//! # Design Decisions
//! - Fail fast: the balancer cannot serve without its full backend pool,
//!   so any startup connect failure is fatal

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

use crate::balancer::BackendRegistry;
use crate::config::BalancerConfig;
use crate::proxy::ProxyState;
use crate::upstream::{BackendSession, SessionError};

/// Errors that abort the process before it starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("backends[{index}].address {address:?} is not a valid socket address")]
    Address {
        index: usize,
        address: String,
        source: std::net::AddrParseError,
    },
    #[error("backends[{index}]: {source}")]
    Connect { index: usize, source: SessionError },
}

/// Connect the backend pool and build the shared proxy state.
pub async fn init_backends(config: &BalancerConfig) -> Result<ProxyState, StartupError> {
    let mut entries = Vec::with_capacity(config.backends.len());
    let mut sessions = Vec::with_capacity(config.backends.len());

    for (index, backend) in config.backends.iter().enumerate() {
        let addr: SocketAddr = backend.address.parse().map_err(|source| StartupError::Address {
            index,
            address: backend.address.clone(),
            source,
        })?;

        let session = BackendSession::connect(addr, config.proxy.read_buffer_size)
            .await
            .map_err(|source| StartupError::Connect { index, source })?;

        tracing::info!(
            backend = index,
            address = %addr,
            class = %backend.class,
            "connected to backend"
        );

        entries.push((addr, backend.class));
        sessions.push(session);
    }

    Ok(ProxyState {
        registry: Arc::new(BackendRegistry::new(entries)),
        sessions: Arc::new(sessions),
        read_buffer_size: config.proxy.read_buffer_size,
    })
}
