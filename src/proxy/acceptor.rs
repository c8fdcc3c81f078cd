//! Client accept loop.

use tokio::sync::broadcast;

use crate::net::{Listener, ListenerError};
use crate::proxy::{handler, ProxyState};

/// Sequentially accepts client connections and spawns a detached handler
/// task for each, until shutdown is signalled.
pub struct Acceptor {
    listener: Listener,
    state: ProxyState,
}

impl Acceptor {
    pub fn new(listener: Listener, state: ProxyState) -> Self {
        Self { listener, state }
    }

    /// Run the accept loop. A failed accept is logged and the loop
    /// continues; only shutdown ends it. Once shutdown is signalled the
    /// loop stops accepting and waits for in-flight connections to finish
    /// before returning.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), ListenerError> {
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("shutdown signalled, no longer accepting");
                    self.listener.drain().await;
                    tracing::info!("in-flight connections drained");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer, permit)) => {
                            let state = self.state.clone();
                            tokio::spawn(async move {
                                // Permit held for the connection's lifetime.
                                let _permit = permit;
                                if let Err(err) = handler::handle_connection(stream, peer, state).await {
                                    tracing::warn!(peer = %peer, error = %err, "request failed");
                                }
                            });
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "accept failed");
                        }
                    }
                }
            }
        }
    }
}
