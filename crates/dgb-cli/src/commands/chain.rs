// crates/dgb-cli/src/commands/chain.rs
//
// `dgb-cli getblockcount` and `dgb-cli generatetoaddress <n> <address>`.

use clap::Args;
use serde_json::json;

use dgb_rpc::handlers::chain::{GenerateToAddressResponse, GetBlockCountResponse};

use crate::output::{format_json, OutputFormat};
use crate::rpc_client::rpc_result;

/// Regtest block generation command.
#[derive(Debug, Args)]
pub struct GenerateCmd {
    /// Number of blocks to generate.
    pub nblocks: u64,

    /// Address credited by each coinbase.
    pub address: String,
}

/// Run the getblockcount command.
pub async fn run_block_count(
    rpc: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = rpc_result(rpc, "getblockcount", json!({})).await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&result));
    } else {
        let count: GetBlockCountResponse = serde_json::from_value(result)?;
        println!("{}", count.blocks);
    }

    Ok(())
}

/// Run the generatetoaddress command.
pub async fn run_generate(
    cmd: &GenerateCmd,
    rpc: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = json!({ "nblocks": cmd.nblocks, "address": cmd.address });
    let result = rpc_result(rpc, "generatetoaddress", params).await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&result));
        return Ok(());
    }

    let generated: GenerateToAddressResponse = serde_json::from_value(result)?;
    for hash in &generated.hashes {
        println!("{}", hash);
    }
    println!("Generated {} blocks to {}", generated.hashes.len(), cmd.address);

    Ok(())
}
