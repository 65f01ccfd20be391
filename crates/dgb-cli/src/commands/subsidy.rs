// crates/dgb-cli/src/commands/subsidy.rs
//
// `dgb-cli subsidy <height> [--network N]`: offline reward lookup against a
// network preset. No daemon is contacted.

use clap::Args;
use serde::Serialize;

use dgb_core::Network;
use dgb_economics::{schedule_for, Dgb, RewardResolver, Sats};

use crate::output::{format_height, format_json, OutputFormat};

/// Offline subsidy lookup.
#[derive(Debug, Args)]
pub struct SubsidyCmd {
    /// Block height.
    #[arg(allow_negative_numbers = true)]
    pub height: i64,

    /// Network preset to evaluate.
    #[arg(long, default_value = "main")]
    pub network: Network,
}

#[derive(Debug, Serialize)]
struct SubsidyReport {
    network: Network,
    height: i64,
    subsidy_sats: Sats,
    subsidy: String,
    next_change_height: Option<u64>,
}

fn report(cmd: &SubsidyCmd) -> Result<SubsidyReport, Box<dyn std::error::Error>> {
    let resolver = RewardResolver::new(schedule_for(cmd.network)?);
    let subsidy_sats = resolver.reward_at(cmd.height)?;
    let next_change_height = u64::try_from(cmd.height)
        .ok()
        .and_then(|h| resolver.next_change_height(h));

    Ok(SubsidyReport {
        network: cmd.network,
        height: cmd.height,
        subsidy_sats,
        subsidy: Dgb::from_sats(subsidy_sats).to_decimal_string(),
        next_change_height,
    })
}

/// Run the subsidy command.
pub async fn run(cmd: &SubsidyCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let report = report(cmd)?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&report));
        return Ok(());
    }

    println!(
        "{} height {}: {} DGB ({} sats)",
        report.network, report.height, report.subsidy, report.subsidy_sats
    );
    println!("Next change: {}", format_height(report.next_change_height));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regtest_launch_reward() {
        let r = report(&SubsidyCmd {
            height: 101,
            network: Network::Regtest,
        })
        .unwrap();
        assert_eq!(r.subsidy, "72000");
        assert_eq!(r.next_change_height, Some(1_440));
    }

    #[test]
    fn test_negative_height_fails() {
        assert!(report(&SubsidyCmd {
            height: -1,
            network: Network::Main,
        })
        .is_err());
    }
}
