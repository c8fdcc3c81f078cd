//! Balancer entry point: CLI, logging init, startup sequence.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_balancer::config::loader::load_config;
use media_balancer::lifecycle::{signals, startup};
use media_balancer::net::Listener;
use media_balancer::proxy::Acceptor;
use media_balancer::{BalancerConfig, Shutdown};

#[derive(Debug, Parser)]
#[command(name = "media-balancer", about = "Class-affine TCP load balancer for media services")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "media-balancer.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_balancer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config: BalancerConfig = load_config(&args.config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        backends = config.backends.len(),
        "configuration loaded"
    );

    // Connect the whole backend pool first; any failure here is fatal.
    let state = startup::init_backends(&config).await?;

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Arc::new(Shutdown::new());
    signals::listen_for_interrupt(Arc::clone(&shutdown));

    Acceptor::new(listener, state).run(shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
