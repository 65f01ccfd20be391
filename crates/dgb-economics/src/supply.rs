// crates/dgb-economics/src/supply.rs
//
// Supply accounting over the emission schedule.
//
// Totals are summed per constant-reward segment rather than per block, so a
// query spanning millions of heights costs one step per halving or era
// boundary. Accumulators are u128; no schedule can overflow them.

use crate::reward::RewardResolver;

/// Total subsidy (in sats) of the blocks `[start, start + count)`.
///
/// Heights past `u64::MAX` are not part of any chain and are ignored.
pub fn emission_over(resolver: &RewardResolver, start: u64, count: u64) -> u128 {
    let end = start.saturating_add(count);
    let mut total: u128 = 0;
    let mut current = start;

    while current < end {
        let reward = resolver.reward_at_height(current);
        let segment_end = match resolver.next_change_height(current) {
            Some(change) => change.min(end),
            None => end,
        };
        total += u128::from(reward) * u128::from(segment_end - current);
        current = segment_end;
    }

    total
}

/// Cumulative subsidy (in sats) of heights `[0, blocks)`.
///
/// `cumulative_emission(r, tip + 1)` is the amount issued by a chain whose
/// best block is at height `tip`, genesis included.
pub fn cumulative_emission(resolver: &RewardResolver, blocks: u64) -> u128 {
    emission_over(resolver, 0, blocks)
}
