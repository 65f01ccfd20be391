// crates/dgb-cli/src/commands/schedule.rs
//
// `dgb-cli schedule [--network N | --remote]`: display the emission schedule.
//
// By default the network preset is rendered offline. With `--remote` the
// schedule the daemon actually loaded (including any configured override)
// is fetched over RPC.

use clap::Args;
use serde_json::json;
use tabled::Tabled;

use dgb_core::Network;
use dgb_economics::{schedule_for, RewardResolver};
use dgb_rpc::handlers::reward::{
    handle_get_emission_schedule, GetEmissionScheduleRequest, GetEmissionScheduleResponse,
};

use crate::output::{format_amount, format_height, format_json, format_table, OutputFormat};
use crate::rpc_client::rpc_result;

/// Emission schedule display command.
#[derive(Debug, Args)]
pub struct ScheduleCmd {
    /// Network preset to show.
    #[arg(long, default_value = "main", conflicts_with = "remote")]
    pub network: Network,

    /// Fetch the schedule from the daemon instead.
    #[arg(long)]
    pub remote: bool,
}

/// A row in the schedule table.
#[derive(Tabled)]
struct EraRow {
    #[tabled(rename = "Era")]
    index: usize,
    #[tabled(rename = "Start")]
    start: u64,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Reward (DGB)")]
    reward: String,
    #[tabled(rename = "Halving every")]
    halving: String,
}

fn rows(schedule: &GetEmissionScheduleResponse) -> Vec<EraRow> {
    schedule
        .eras
        .iter()
        .enumerate()
        .map(|(index, era)| EraRow {
            index,
            start: era.start_height,
            end: format_height(era.end_height),
            reward: format_amount(&era.base_reward),
            halving: format_height(era.halving_interval),
        })
        .collect()
}

/// Run the schedule command.
pub async fn run(
    cmd: &ScheduleCmd,
    rpc: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let schedule: GetEmissionScheduleResponse = if cmd.remote {
        serde_json::from_value(rpc_result(rpc, "getemissionschedule", json!({})).await?)?
    } else {
        let resolver = RewardResolver::new(schedule_for(cmd.network)?);
        handle_get_emission_schedule(GetEmissionScheduleRequest {}, &resolver, cmd.network)
            .await?
    };

    if format == OutputFormat::Json {
        println!("{}", format_json(&schedule));
        return Ok(());
    }

    println!(
        "Emission schedule ({}{})",
        schedule.network,
        if cmd.remote { ", from daemon" } else { " preset" }
    );
    println!("{}", format_table(&rows(&schedule)));

    Ok(())
}
