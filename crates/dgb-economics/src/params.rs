// crates/dgb-economics/src/params.rs
//
// Per-network monetary policy presets.
//
// Every network shares the launch eras: the genesis block pays 8,000 DGB,
// heights [1, 1440) pay 72,000 DGB, heights [1440, 5760) pay 16,000 DGB.
// From height 5760 the reward starts at 8,000 DGB and halves on a
// per-network interval. Signet skips the launch eras entirely.

use std::num::NonZeroU64;

use dgb_core::Network;

use crate::emission::{EmissionEra, EmissionSchedule, RewardRule};
use crate::error::EmissionError;
use crate::token::{Sats, SATS_PER_DGB};

/// Reward paid by the genesis coinbase.
pub const GENESIS_REWARD: Sats = 8_000 * SATS_PER_DGB;

/// Reward for heights [1, LAUNCH_ERA_END).
pub const LAUNCH_REWARD: Sats = 72_000 * SATS_PER_DGB;
pub const LAUNCH_ERA_END: u64 = 1_440;

/// Reward for heights [LAUNCH_ERA_END, EARLY_ERA_END).
pub const EARLY_REWARD: Sats = 16_000 * SATS_PER_DGB;
pub const EARLY_ERA_END: u64 = 5_760;

/// Starting reward of the open-ended halving era.
pub const TAIL_BASE_REWARD: Sats = 8_000 * SATS_PER_DGB;

/// Halving interval on main and signet.
pub const MAINNET_HALVING_INTERVAL: NonZeroU64 = nonzero(210_000);

/// Halving interval on test and regtest, short enough to reach in tests.
pub const TESTNET_HALVING_INTERVAL: NonZeroU64 = nonzero(300);

const fn nonzero(n: u64) -> NonZeroU64 {
    match NonZeroU64::new(n) {
        Some(n) => n,
        None => panic!("halving interval must be non-zero"),
    }
}

/// Halving interval for `network`.
pub fn halving_interval(network: Network) -> NonZeroU64 {
    match network {
        Network::Main | Network::Signet => MAINNET_HALVING_INTERVAL,
        Network::Test | Network::Regtest => TESTNET_HALVING_INTERVAL,
    }
}

/// The eras for `network`, unvalidated.
pub fn eras_for(network: Network) -> Vec<EmissionEra> {
    let interval = halving_interval(network);
    let halving = |start: u64, base: Sats| EmissionEra {
        start_height: start,
        end_height: None,
        base_reward: base,
        rule: RewardRule::Halving { interval },
    };

    match network {
        Network::Signet => vec![
            EmissionEra::flat(0, Some(1), GENESIS_REWARD),
            halving(1, TAIL_BASE_REWARD),
        ],
        Network::Main | Network::Test | Network::Regtest => vec![
            EmissionEra::flat(0, Some(1), GENESIS_REWARD),
            EmissionEra::flat(1, Some(LAUNCH_ERA_END), LAUNCH_REWARD),
            EmissionEra::flat(LAUNCH_ERA_END, Some(EARLY_ERA_END), EARLY_REWARD),
            halving(EARLY_ERA_END, TAIL_BASE_REWARD),
        ],
    }
}

/// The validated emission schedule for `network`.
pub fn schedule_for(network: Network) -> Result<EmissionSchedule, EmissionError> {
    EmissionSchedule::new(eras_for(network))
}
