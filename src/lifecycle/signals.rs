//! OS signal handling.
//!
//! # Responsibilities
//! - Register the interrupt handler (ctrl-c)
//! - Translate it to the internal shutdown signal

use std::sync::Arc;

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers shutdown on ctrl-c.
pub fn listen_for_interrupt(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("interrupt received, shutting down");
                shutdown.trigger();
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install interrupt handler");
            }
        }
    });
}
