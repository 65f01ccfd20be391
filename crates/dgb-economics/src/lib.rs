// crates/dgb-economics/src/lib.rs
//
// dgb-economics: DGB monetary policy for the reward node.
//
// The emission schedule and reward resolver in this crate are consensus
// critical: every node must compute the same subsidy for the same height.
// All monetary values are tracked in sats (1 DGB = 100,000,000 sats) and
// no floating point is used anywhere in the reward path.

pub mod emission;
pub mod error;
pub mod params;
pub mod reward;
pub mod supply;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use emission::{EmissionEra, EmissionSchedule, RewardRule};
pub use error::EmissionError;
pub use params::{halving_interval, schedule_for};
pub use reward::RewardResolver;
pub use supply::{cumulative_emission, emission_over};
pub use token::{Dgb, Sats, MAX_MONEY, SATS_PER_DGB};
