//! Persistent backend sessions.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Errors on the backend-facing transport.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connect to backend {addr} failed: {source}")]
    Connect {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("backend I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend closed the connection")]
    Closed,
}

/// A persistent connection to one backend.
///
/// The stream lives behind an async mutex so that concurrent requests
/// assigned to the same backend serialize their send/receive exchanges.
#[derive(Debug)]
pub struct BackendSession {
    addr: SocketAddr,
    read_buffer_size: usize,
    stream: Mutex<TcpStream>,
}

impl BackendSession {
    /// Open the initial connection to `addr`.
    pub async fn connect(addr: SocketAddr, read_buffer_size: usize) -> Result<Self, SessionError> {
        let stream = Self::open(addr).await?;
        Ok(Self {
            addr,
            read_buffer_size,
            stream: Mutex::new(stream),
        })
    }

    /// Address of the backend this session talks to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// One send/receive exchange: forward `payload`, return the backend's
    /// single-read response. A zero-byte read means the backend dropped the
    /// connection.
    pub async fn exchange(&self, payload: &[u8]) -> Result<Vec<u8>, SessionError> {
        let mut stream = self.stream.lock().await;

        stream.write_all(payload).await?;

        let mut buf = vec![0u8; self.read_buffer_size];
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Err(SessionError::Closed);
        }
        buf.truncate(n);
        Ok(buf)
    }

    /// Replace a dropped connection with a fresh one. The stale stream is
    /// closed when it is swapped out.
    pub async fn reconnect(&self) -> Result<(), SessionError> {
        let fresh = Self::open(self.addr).await?;
        let mut stream = self.stream.lock().await;
        *stream = fresh;
        tracing::info!(backend = %self.addr, "reconnected to backend");
        Ok(())
    }

    async fn open(addr: SocketAddr) -> Result<TcpStream, SessionError> {
        TcpStream::connect(addr)
            .await
            .map_err(|source| SessionError::Connect { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connect_fails_against_closed_port() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = BackendSession::connect(addr, 1024).await.unwrap_err();
        assert!(matches!(err, SessionError::Connect { .. }));
    }

    #[tokio::test]
    async fn exchange_round_trips_over_a_persistent_stream() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                socket.write_all(&buf[..n]).await.unwrap();
            }
        });

        let session = BackendSession::connect(addr, 1024).await.unwrap();
        assert_eq!(session.exchange(b"V5").await.unwrap(), b"V5");
        // Same stream serves a second exchange.
        assert_eq!(session.exchange(b"M3").await.unwrap(), b"M3");
    }

    #[tokio::test]
    async fn dropped_backend_surfaces_as_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept, then hang up without replying.
            let (socket, _) = listener.accept().await.unwrap();
            drop(socket);
        });

        let session = BackendSession::connect(addr, 1024).await.unwrap();
        let err = session.exchange(b"V5").await.unwrap_err();
        assert!(matches!(err, SessionError::Closed | SessionError::Io(_)));
    }
}
