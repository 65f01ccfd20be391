// crates/dgb-economics/src/reward.rs
//
// Block reward resolution.
//
// reward(h) for an era starting at S with base reward B:
//   Flat                  -> B
//   Halving { interval I } -> B >> ((h - S) / I)
//
// Integer arithmetic only. A shift count of 64 or more yields zero, which is
// the same result as repeatedly floor-halving B until it vanishes.

use crate::emission::{EmissionEra, EmissionSchedule, RewardRule};
use crate::error::EmissionError;
use crate::token::Sats;

/// Resolves the exact subsidy for any block height from an emission schedule.
///
/// Holds no mutable state; share it behind an `Arc` and call it from any
/// number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardResolver {
    schedule: EmissionSchedule,
}

impl RewardResolver {
    pub fn new(schedule: EmissionSchedule) -> Self {
        Self { schedule }
    }

    /// The schedule this resolver answers from.
    pub fn schedule(&self) -> &EmissionSchedule {
        &self.schedule
    }

    /// Subsidy in sats for a block at `height`.
    ///
    /// Returns `InvalidHeight` for negative heights. Never depends on the
    /// current chain tip or wall-clock time.
    pub fn reward_at(&self, height: i64) -> Result<Sats, EmissionError> {
        let era = self.schedule.era_for(height)?;
        // era_for has already rejected negative heights.
        let height = u64::try_from(height).map_err(|_| EmissionError::InvalidHeight(height))?;
        Ok(era_reward(era, height))
    }

    /// Subsidy for an already-unsigned height. Total over all `u64`.
    pub fn reward_at_height(&self, height: u64) -> Sats {
        let era = &self.schedule.eras()[self.schedule.era_index_for(height)];
        era_reward(era, height)
    }

    /// First height above `height` where the subsidy changes, or `None` if the
    /// subsidy is constant from `height` onwards.
    pub fn next_change_height(&self, height: u64) -> Option<u64> {
        let eras = self.schedule.eras();
        let mut index = self.schedule.era_index_for(height);
        let current = self.reward_at_height(height);
        let mut from = height;

        loop {
            let era = &eras[index];
            // Next halving boundary inside this era, if the reward can still drop.
            if let RewardRule::Halving { interval } = era.rule {
                if era_reward(era, from) > 0 {
                    let periods = (from - era.start_height) / interval.get();
                    let boundary = periods
                        .checked_add(1)
                        .and_then(|p| p.checked_mul(interval.get()))
                        .and_then(|offset| era.start_height.checked_add(offset));
                    if let Some(boundary) = boundary {
                        if era.contains(boundary) {
                            return Some(boundary);
                        }
                    }
                }
            }

            // Otherwise the next candidate is the start of the following era.
            let end = era.end_height?;
            index += 1;
            from = end;
            if self.reward_at_height(end) != current {
                return Some(end);
            }
        }
    }
}

/// Reward for `height` within `era`. `height` must lie inside the era.
fn era_reward(era: &EmissionEra, height: u64) -> Sats {
    match era.rule {
        RewardRule::Flat => era.base_reward,
        RewardRule::Halving { interval } => {
            let periods = (height - era.start_height) / interval.get();
            halve(era.base_reward, periods)
        }
    }
}

/// `reward` floor-halved `periods` times.
fn halve(reward: Sats, periods: u64) -> Sats {
    if periods >= u64::from(Sats::BITS) {
        0
    } else {
        reward >> periods
    }
}
