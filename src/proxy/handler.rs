//! Per-connection request handling.
//!
//! State machine per client connection:
//! `Accepted → Validated → Assigned → Forwarded → Responded | Failed`.
//! Any failure closes the client connection without sending a reply; the
//! caller logs the error.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::protocol::{Request, RequestError};
use crate::proxy::ProxyState;
use crate::upstream::SessionError;

/// Ways a single proxied request can fail.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to read client request: {0}")]
    ClientRead(std::io::Error),
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
    #[error("no backends available")]
    NoBackends,
    #[error("backend exchange failed after reconnect: {0}")]
    Backend(#[from] SessionError),
    #[error("failed to relay response to client: {0}")]
    ClientWrite(std::io::Error),
}

/// Proxy one client connection end to end.
///
/// The client connection is closed on every exit path when `client` drops.
pub async fn handle_connection(
    mut client: TcpStream,
    peer: SocketAddr,
    state: ProxyState,
) -> Result<(), ProxyError> {
    let mut buf = vec![0u8; state.read_buffer_size];
    let n = client.read(&mut buf).await.map_err(ProxyError::ClientRead)?;
    let raw = &buf[..n];

    let request = Request::parse(raw)?;

    let assignment = state.registry.assign(&request).ok_or(ProxyError::NoBackends)?;
    tracing::info!(
        peer = %peer,
        category = %request.category,
        duration = request.duration,
        backend = assignment.backend,
        address = %assignment.addr,
        class = %assignment.class,
        expected_load = assignment.expected_load,
        "request delegated"
    );

    let session = &state.sessions[assignment.backend];
    let response = match session.exchange(raw).await {
        Ok(response) => response,
        Err(err) => {
            // Dropped backend connection: reconnect and retry exactly once.
            tracing::warn!(
                backend = assignment.backend,
                address = %session.addr(),
                error = %err,
                "backend exchange failed, reconnecting"
            );
            session.reconnect().await?;
            session.exchange(raw).await?
        }
    };

    client
        .write_all(&response)
        .await
        .map_err(ProxyError::ClientWrite)?;

    tracing::debug!(
        peer = %peer,
        backend = assignment.backend,
        response_len = response.len(),
        "response relayed"
    );
    Ok(())
}
