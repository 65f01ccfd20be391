// crates/dgb-cli/src/main.rs
//
// CLI entrypoint for the DGB reward node tools.
//
// Provides subcommands for querying the block reward, inspecting and
// extending the regtest chain, viewing the emission schedule, computing
// subsidies offline, and checking node status.

mod commands;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::chain::GenerateCmd;
use commands::reward::RewardCmd;
use commands::schedule::ScheduleCmd;
use commands::subsidy::SubsidyCmd;
use output::OutputFormat;

/// DGB CLI: client for the dgbd reward node.
#[derive(Parser, Debug)]
#[command(
    name = "dgb-cli",
    version = "0.1.0",
    about = "DGB CLI: block reward, emission schedule, and regtest chain tools"
)]
struct Cli {
    /// RPC endpoint for dgbd.
    #[arg(long, global = true, default_value = "http://127.0.0.1:14022")]
    rpc: String,

    /// Print raw JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Block reward at a height (defaults to the tip).
    #[command(name = "getblockreward")]
    GetBlockReward(RewardCmd),

    /// Height of the best-chain tip.
    #[command(name = "getblockcount")]
    GetBlockCount,

    /// Generate blocks to an address (regtest only).
    #[command(name = "generatetoaddress")]
    GenerateToAddress(GenerateCmd),

    /// Display the emission schedule.
    Schedule(ScheduleCmd),

    /// Compute the subsidy at a height offline.
    Subsidy(SubsidyCmd),

    /// Display node connection status and version info.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let format = OutputFormat::from_flag(cli.json);

    match &cli.command {
        Commands::GetBlockReward(cmd) => commands::reward::run(cmd, &cli.rpc, format).await?,
        Commands::GetBlockCount => commands::chain::run_block_count(&cli.rpc, format).await?,
        Commands::GenerateToAddress(cmd) => {
            commands::chain::run_generate(cmd, &cli.rpc, format).await?
        }
        Commands::Schedule(cmd) => commands::schedule::run(cmd, &cli.rpc, format).await?,
        Commands::Subsidy(cmd) => commands::subsidy::run(cmd, format).await?,
        Commands::Status => commands::status::run(&cli.rpc, format).await?,
    }

    Ok(())
}
