//! Attest Node — entry point.
//!
//! Starts the credential issuance/verification HTTP node with configuration
//! from a TOML file or defaults.

mod api;
mod config;
mod worker;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use attest_store::MemoryStore;

use api::AppState;
use config::NodeConfig;

/// Attest Node
#[derive(Parser, Debug)]
#[command(name = "attest-node", version, about = "Attest credential service node")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "attest.toml")]
    config: PathBuf,

    /// Override the API port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the worker identity.
    #[arg(long)]
    worker_id: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // Handle --init flag
    if args.init {
        let config = NodeConfig::default();
        config.save(&args.config)?;
        tracing::info!(path = %args.config.display(), "wrote default config");
        return Ok(());
    }

    // Load configuration
    let mut config = NodeConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if args.worker_id.is_some() {
        config.worker.id = args.worker_id;
    }
    config.logging.level = args.log_level;

    tracing::info!("Attest Node v{}", env!("CARGO_PKG_VERSION"));

    // Resolve the worker identity once; the operations receive it at
    // construction and never touch the environment.
    let worker_id = worker::resolve_worker_id(config.worker.id.as_deref());
    tracing::info!(%worker_id, "worker identity resolved");

    let listen_addr: SocketAddr = config.api_addr().parse()?;
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store, &worker_id);

    // Set up graceful shutdown on ctrl-c
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
        tracing::info!("received shutdown signal");
    };

    tokio::select! {
        result = api::start_api_server(listen_addr, state) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "API server error");
            }
        }
        _ = shutdown => {
            tracing::info!("initiating graceful shutdown");
        }
    }

    tracing::info!("Attest node exited cleanly");
    Ok(())
}
