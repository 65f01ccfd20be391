// crates/dgb-daemon/src/main.rs
//
// Binary entrypoint for the DGB daemon.
//
// Parses CLI arguments, resolves configuration and the emission schedule,
// initializes tracing, constructs shared state, and serves RPC until Ctrl-C.
// An unreadable config or malformed schedule stops the daemon before the RPC
// server binds.

mod config;
mod shared;
mod state;

use std::path::Path;

use clap::Parser;
use config::{ConfigSource, Startup};
use shared::DaemonSharedState;
use state::{NodeState, NodeStateMachine};

use dgb_core::Network;
use dgb_rpc::{DgbRpcServer, RpcConfig};

/// DGB daemon: serves the block reward schedule and a regtest chain.
#[derive(Parser, Debug)]
#[command(name = "dgbd", version = "0.1.0", about = "DGB block reward node daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.dgb/config.toml")]
    config: String,

    /// Network to run: main, test, signet, or regtest.
    #[arg(long)]
    network: Option<Network>,

    /// RPC port, overriding the config file and network default.
    #[arg(long)]
    rpc_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config_path = expand_tilde(&args.config);

    // Read the config and validate the schedule up front. Only a missing file
    // falls back to defaults. The outcome is logged once tracing is up.
    let prepared = config::prepare(Path::new(&config_path), args.network, args.rpc_port);

    // Initialize tracing subscriber for structured logging. RUST_LOG wins
    // over the configured level.
    let log_level = match &prepared {
        Ok(startup) => startup.config.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("DGB Daemon v{}", env!("CARGO_PKG_VERSION"));

    let mut state_machine = NodeStateMachine::new();
    state_machine.transition(NodeState::LoadingSchedule)?;

    let Startup {
        config: daemon_config,
        schedule,
        source,
    } = match prepared {
        Ok(startup) => startup,
        Err(e) => {
            tracing::error!("Refusing to start with config {}: {}", config_path, e);
            let _ = state_machine.transition(NodeState::ShuttingDown);
            return Err(e.into());
        }
    };

    match source {
        ConfigSource::File => tracing::info!("Loaded configuration from {}", config_path),
        ConfigSource::Defaults => {
            tracing::warn!("No config found at {}. Using defaults.", config_path)
        }
    }
    tracing::info!("Network: {}", daemon_config.network);
    tracing::info!("Data directory: {}", expand_tilde(&daemon_config.data_dir));
    tracing::info!(
        "RPC endpoint: {}:{}",
        daemon_config.rpc_host,
        daemon_config.rpc_port()
    );
    tracing::info!(
        "Emission schedule loaded: {} eras{}",
        schedule.len(),
        if daemon_config.emission.is_some() {
            " (configured override)"
        } else {
            ""
        }
    );

    let shared_state = DaemonSharedState::new(daemon_config.network, schedule);

    let rpc_config = RpcConfig {
        host: daemon_config.rpc_host.clone(),
        port: daemon_config.rpc_port(),
    };
    let rpc_server = DgbRpcServer::new(
        rpc_config,
        shared_state.resolver.clone(),
        shared_state.chain.clone(),
    )
    .with_start_time(shared_state.start_time);

    state_machine.transition(NodeState::Ready)?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl-C, stopping RPC server");
    };

    let served = rpc_server.start_with_shutdown(shutdown).await;

    // Transition to shutting down.
    let _ = state_machine.transition(NodeState::ShuttingDown);

    if let Err(e) = served {
        tracing::error!("RPC server error: {}", e);
        return Err(format!("RPC server error: {}", e).into());
    }

    tracing::info!("DGB daemon shut down gracefully");
    Ok(())
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
