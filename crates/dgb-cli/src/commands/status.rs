// crates/dgb-cli/src/commands/status.rs
//
// `dgb-cli status`: display node connection status and version info.

use serde_json::json;

use dgb_rpc::handlers::node::{GetHealthResponse, GetNodeInfoResponse};

use crate::output::{format_json, OutputFormat};
use crate::rpc_client::rpc_result;

/// Run the status command.
pub async fn run(rpc: &str, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let info = rpc_result(rpc, "getnodeinfo", json!({})).await?;
    let health = rpc_result(rpc, "gethealth", json!({})).await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&json!({ "node": info, "health": health })));
        return Ok(());
    }

    let info: GetNodeInfoResponse = serde_json::from_value(info)?;
    let health: GetHealthResponse = serde_json::from_value(health)?;

    println!("DGB Node v{}", info.version);
    println!();
    println!("Node Status");
    println!("-----------");
    println!("  RPC endpoint: {}", rpc);
    println!("  Network:      {}", info.network);
    println!("  Health:       {}", health.status);
    println!("  Blocks:       {}", info.blocks);
    println!("  Uptime:       {}s", info.uptime_seconds);
    println!("  Eras loaded:  {}", health.schedule_eras);
    println!(
        "  Generation:   {}",
        if info.generate_enabled { "enabled" } else { "disabled" }
    );
    if let Some(details) = health.details {
        println!("  Details:      {}", details);
    }

    Ok(())
}
