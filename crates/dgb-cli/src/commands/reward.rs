// crates/dgb-cli/src/commands/reward.rs
//
// `dgb-cli getblockreward [--height H]`: block reward from the daemon.

use clap::Args;
use serde_json::json;

use dgb_rpc::handlers::reward::GetBlockRewardResponse;

use crate::output::{format_amount, format_height, format_json, OutputFormat};
use crate::rpc_client::rpc_result;

/// Block reward query.
#[derive(Debug, Args)]
pub struct RewardCmd {
    /// Height to query; defaults to the current tip.
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i64>,
}

/// Run the getblockreward command.
pub async fn run(
    cmd: &RewardCmd,
    rpc: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = match cmd.height {
        Some(height) => json!({ "height": height }),
        None => json!({}),
    };
    let result = rpc_result(rpc, "getblockreward", params).await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&result));
        return Ok(());
    }

    let reward: GetBlockRewardResponse = serde_json::from_value(result)?;
    println!("Height:        {}", reward.height);
    println!("Block reward:  {} DGB", format_amount(&reward.blockreward));
    println!("Subsidy:       {} sats", reward.subsidy_sats);
    println!("Era:           {}", reward.era);
    println!("Next change:   {}", format_height(reward.next_change_height));

    Ok(())
}
