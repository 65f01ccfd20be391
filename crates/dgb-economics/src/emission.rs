// crates/dgb-economics/src/emission.rs
//
// Emission schedule: the chain's permanent monetary policy as an ordered,
// validated table of eras.
//
// Each era covers a half-open height range [start_height, end_height) and
// pays either a flat reward or a reward that halves every `interval` blocks
// counted from the era's own start. The final era is unbounded, so every
// height h >= 0 falls in exactly one era.

use std::num::NonZeroU64;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::EmissionError;
use crate::token::{Sats, MAX_MONEY};

/// How the reward progresses inside one era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RewardRule {
    /// Same reward for every height in the era.
    Flat,
    /// Reward halves (floor division by two) every `interval` blocks.
    Halving { interval: NonZeroU64 },
}

/// One contiguous height range governed by a single reward rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmissionEra {
    /// Inclusive lower bound.
    pub start_height: u64,
    /// Exclusive upper bound; `None` only on the final era.
    #[serde(default)]
    pub end_height: Option<u64>,
    /// Reward at `start_height`, in sats.
    pub base_reward: Sats,
    /// Flat or halving progression.
    pub rule: RewardRule,
}

impl EmissionEra {
    /// A flat-reward era.
    pub fn flat(start_height: u64, end_height: Option<u64>, base_reward: Sats) -> Self {
        Self {
            start_height,
            end_height,
            base_reward,
            rule: RewardRule::Flat,
        }
    }

    /// A halving era. Returns `None` if `interval` is zero.
    pub fn halving(
        start_height: u64,
        end_height: Option<u64>,
        base_reward: Sats,
        interval: u64,
    ) -> Option<Self> {
        let interval = NonZeroU64::new(interval)?;
        Some(Self {
            start_height,
            end_height,
            base_reward,
            rule: RewardRule::Halving { interval },
        })
    }

    /// Whether `height` lies in `[start_height, end_height)`.
    pub fn contains(&self, height: u64) -> bool {
        height >= self.start_height && self.end_height.map_or(true, |end| height < end)
    }
}

/// The validated, immutable sequence of eras.
///
/// Constructed once at start-up and shared read-only. Cloning is a reference
/// count bump. Deserialization goes through [`EmissionSchedule::new`], so a
/// value of this type is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EmissionEra>", into = "Vec<EmissionEra>")]
pub struct EmissionSchedule {
    eras: Arc<[EmissionEra]>,
}

impl EmissionSchedule {
    /// Build a schedule from eras ordered by `start_height`, validating it.
    pub fn new(eras: Vec<EmissionEra>) -> Result<Self, EmissionError> {
        let schedule = Self { eras: eras.into() };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check ordering, contiguity, and full coverage of `[0, ∞)`.
    pub fn validate(&self) -> Result<(), EmissionError> {
        let malformed = |msg: String| Err(EmissionError::MalformedSchedule(msg));

        let Some(first) = self.eras.first() else {
            return malformed("schedule has no eras".to_string());
        };
        if first.start_height != 0 {
            return malformed(format!(
                "first era starts at height {}, expected 0",
                first.start_height
            ));
        }

        let last_index = self.eras.len() - 1;
        for (i, era) in self.eras.iter().enumerate() {
            if era.base_reward > MAX_MONEY {
                return malformed(format!(
                    "era {} base reward {} exceeds MAX_MONEY",
                    i, era.base_reward
                ));
            }

            match era.end_height {
                None if i != last_index => {
                    return malformed(format!("non-final era {} has an unbounded end", i));
                }
                None => {}
                Some(_) if i == last_index => {
                    return malformed(format!(
                        "final era {} is bounded; schedule must cover all heights",
                        i
                    ));
                }
                Some(end) if end <= era.start_height => {
                    return malformed(format!(
                        "era {} is empty: [{}, {})",
                        i, era.start_height, end
                    ));
                }
                Some(end) => {
                    let next = &self.eras[i + 1];
                    if next.start_height < end {
                        return malformed(format!(
                            "era {} overlaps era {}: {} < {}",
                            i + 1,
                            i,
                            next.start_height,
                            end
                        ));
                    }
                    if next.start_height > end {
                        return malformed(format!(
                            "gap between era {} and era {}: heights [{}, {}) uncovered",
                            i,
                            i + 1,
                            end,
                            next.start_height
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// The era governing `height`.
    ///
    /// Fails only for negative heights; the schedule is total over `[0, ∞)`.
    pub fn era_for(&self, height: i64) -> Result<&EmissionEra, EmissionError> {
        let height = u64::try_from(height).map_err(|_| EmissionError::InvalidHeight(height))?;
        Ok(&self.eras[self.era_index_for(height)])
    }

    /// Index of the era governing `height`.
    pub fn era_index_for(&self, height: u64) -> usize {
        // Validation guarantees eras[0].start_height == 0, so the partition
        // point is always >= 1.
        self.eras
            .partition_point(|era| era.start_height <= height)
            .saturating_sub(1)
    }

    /// The eras in height order.
    pub fn eras(&self) -> &[EmissionEra] {
        &self.eras
    }

    pub fn len(&self) -> usize {
        self.eras.len()
    }

    /// Always false for a validated schedule.
    pub fn is_empty(&self) -> bool {
        self.eras.is_empty()
    }
}

impl TryFrom<Vec<EmissionEra>> for EmissionSchedule {
    type Error = EmissionError;

    fn try_from(eras: Vec<EmissionEra>) -> Result<Self, Self::Error> {
        Self::new(eras)
    }
}

impl From<EmissionSchedule> for Vec<EmissionEra> {
    fn from(schedule: EmissionSchedule) -> Self {
        schedule.eras.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halving(start: u64, end: Option<u64>, reward: Sats, interval: u64) -> EmissionEra {
        EmissionEra::halving(start, end, reward, interval).unwrap()
    }

    fn three_era_schedule() -> EmissionSchedule {
        EmissionSchedule::new(vec![
            EmissionEra::flat(0, Some(1), 8_000),
            EmissionEra::flat(1, Some(1_440), 72_000),
            halving(1_440, None, 16_000, 100),
        ])
        .unwrap()
    }

    fn assert_malformed(eras: Vec<EmissionEra>) {
        match EmissionSchedule::new(eras) {
            Err(EmissionError::MalformedSchedule(_)) => {}
            other => panic!("expected MalformedSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_single_unbounded_era_is_valid() {
        let schedule = EmissionSchedule::new(vec![EmissionEra::flat(0, None, 1)]).unwrap();
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_rejects_empty_schedule() {
        assert_malformed(vec![]);
    }

    #[test]
    fn test_rejects_first_era_not_at_genesis() {
        assert_malformed(vec![EmissionEra::flat(5, None, 1)]);
    }

    #[test]
    fn test_rejects_gap() {
        assert_malformed(vec![
            EmissionEra::flat(0, Some(10), 1),
            EmissionEra::flat(11, None, 1),
        ]);
    }

    #[test]
    fn test_rejects_overlap() {
        assert_malformed(vec![
            EmissionEra::flat(0, Some(10), 1),
            EmissionEra::flat(9, None, 1),
        ]);
    }

    #[test]
    fn test_rejects_non_final_unbounded_era() {
        assert_malformed(vec![
            EmissionEra::flat(0, None, 1),
            EmissionEra::flat(10, None, 1),
        ]);
    }

    #[test]
    fn test_rejects_bounded_final_era() {
        assert_malformed(vec![
            EmissionEra::flat(0, Some(10), 1),
            EmissionEra::flat(10, Some(20), 1),
        ]);
    }

    #[test]
    fn test_rejects_empty_era() {
        assert_malformed(vec![
            EmissionEra::flat(0, Some(0), 1),
            EmissionEra::flat(0, None, 1),
        ]);
    }

    #[test]
    fn test_rejects_reward_above_max_money() {
        assert_malformed(vec![EmissionEra::flat(0, None, MAX_MONEY + 1)]);
    }

    #[test]
    fn test_zero_interval_is_unrepresentable() {
        assert!(EmissionEra::halving(0, None, 1, 0).is_none());
    }

    #[test]
    fn test_era_for_boundaries() {
        let schedule = three_era_schedule();
        assert_eq!(schedule.era_for(0).unwrap().base_reward, 8_000);
        assert_eq!(schedule.era_for(1).unwrap().base_reward, 72_000);
        assert_eq!(schedule.era_for(1_439).unwrap().base_reward, 72_000);
        assert_eq!(schedule.era_for(1_440).unwrap().base_reward, 16_000);
        assert_eq!(schedule.era_for(i64::MAX).unwrap().base_reward, 16_000);
    }

    #[test]
    fn test_era_for_negative_height() {
        let schedule = three_era_schedule();
        assert_eq!(
            schedule.era_for(-1).unwrap_err(),
            EmissionError::InvalidHeight(-1)
        );
    }

    #[test]
    fn test_exactly_one_era_contains_each_height() {
        let schedule = three_era_schedule();
        for h in [0u64, 1, 2, 1_000, 1_439, 1_440, 1_441, 1_000_000] {
            let matching = schedule.eras().iter().filter(|e| e.contains(h)).count();
            assert_eq!(matching, 1, "height {}", h);
            assert!(schedule.eras()[schedule.era_index_for(h)].contains(h));
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[
            {"start_height": 0, "end_height": 10, "base_reward": 5, "rule": {"kind": "flat"}},
            {"start_height": 12, "base_reward": 5, "rule": {"kind": "halving", "interval": 4}}
        ]"#;
        assert!(serde_json::from_str::<EmissionSchedule>(json).is_err());

        let json = r#"[
            {"start_height": 0, "end_height": 10, "base_reward": 5, "rule": {"kind": "flat"}},
            {"start_height": 10, "base_reward": 5, "rule": {"kind": "halving", "interval": 4}}
        ]"#;
        let schedule: EmissionSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_deserialize_rejects_zero_interval() {
        let json = r#"[
            {"start_height": 0, "base_reward": 5, "rule": {"kind": "halving", "interval": 0}}
        ]"#;
        assert!(serde_json::from_str::<EmissionSchedule>(json).is_err());
    }

    #[test]
    fn test_serialize_round_trips() {
        let schedule = three_era_schedule();
        let json = serde_json::to_string(&schedule).unwrap();
        let back: EmissionSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }
}
