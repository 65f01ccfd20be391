// crates/dgb-rpc/src/handlers/reward.rs
//
// Monetary policy handlers: GetBlockReward, GetEmissionSchedule, GetSupplyInfo.
//
// Each handler resolves "current tip" to a plain height before calling into
// the resolver, so reward answers depend only on the height value.

use serde::{Deserialize, Serialize};

use dgb_core::traits::ChainView;
use dgb_core::Network;
use dgb_economics::{cumulative_emission, RewardResolver, RewardRule};

use crate::error::RpcError;
use crate::handlers::amount_value;

/// Resolve an optional requested height to a signed height, defaulting to the tip.
async fn height_or_tip(height: Option<i64>, chain: &dyn ChainView) -> Result<i64, RpcError> {
    match height {
        Some(h) => Ok(h),
        None => {
            let tip = chain.tip_height().await?;
            i64::try_from(tip)
                .map_err(|_| RpcError::internal(format!("tip height {} overflows", tip)))
        }
    }
}

// ---------------------------------------------------------------------------
// GetBlockReward
// ---------------------------------------------------------------------------

/// Request for the block reward at a height.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlockRewardRequest {
    /// Height to query; the current tip when omitted. Heights above the tip
    /// are answered from the schedule.
    #[serde(default)]
    pub height: Option<i64>,
}

/// Response containing the block reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlockRewardResponse {
    /// Reward in whole DGB: an integer when exact, else a fixed
    /// eight-decimal string.
    pub blockreward: serde_json::Value,
    /// Reward in sats.
    pub subsidy_sats: u64,
    /// Height the reward was computed for.
    pub height: u64,
    /// Index of the emission era containing `height`.
    pub era: usize,
    /// Next height at which the reward changes, if it ever does.
    pub next_change_height: Option<u64>,
}

/// Handle a GetBlockReward request.
///
/// Negative heights are rejected with `RPC_INVALID_PARAMETER`.
pub async fn handle_get_block_reward(
    request: GetBlockRewardRequest,
    resolver: &RewardResolver,
    chain: &dyn ChainView,
) -> Result<GetBlockRewardResponse, RpcError> {
    let height = height_or_tip(request.height, chain).await?;
    let subsidy = resolver.reward_at(height)?;
    // reward_at accepted the height, so it is non-negative.
    let height = u64::try_from(height).map_err(|_| RpcError::internal("height sign changed"))?;

    Ok(GetBlockRewardResponse {
        blockreward: amount_value(subsidy),
        subsidy_sats: subsidy,
        height,
        era: resolver.schedule().era_index_for(height),
        next_change_height: resolver.next_change_height(height),
    })
}

// ---------------------------------------------------------------------------
// GetEmissionSchedule
// ---------------------------------------------------------------------------

/// Request for the emission schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetEmissionScheduleRequest {}

/// One era as exposed over RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraInfo {
    pub start_height: u64,
    /// Exclusive; `null` for the final, open-ended era.
    pub end_height: Option<u64>,
    /// Base reward in whole DGB.
    pub base_reward: serde_json::Value,
    pub base_reward_sats: u64,
    /// Blocks between halvings, or `null` for a flat era.
    pub halving_interval: Option<u64>,
}

/// Response containing the emission schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEmissionScheduleResponse {
    pub network: Network,
    pub eras: Vec<EraInfo>,
}

/// Handle a GetEmissionSchedule request.
pub async fn handle_get_emission_schedule(
    _request: GetEmissionScheduleRequest,
    resolver: &RewardResolver,
    network: Network,
) -> Result<GetEmissionScheduleResponse, RpcError> {
    let eras = resolver
        .schedule()
        .eras()
        .iter()
        .map(|era| EraInfo {
            start_height: era.start_height,
            end_height: era.end_height,
            base_reward: amount_value(era.base_reward),
            base_reward_sats: era.base_reward,
            halving_interval: match era.rule {
                RewardRule::Flat => None,
                RewardRule::Halving { interval } => Some(interval.get()),
            },
        })
        .collect();

    Ok(GetEmissionScheduleResponse { network, eras })
}

// ---------------------------------------------------------------------------
// GetSupplyInfo
// ---------------------------------------------------------------------------

/// Request for the cumulative issued supply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetSupplyInfoRequest {
    /// Last height to include; the current tip when omitted.
    #[serde(default)]
    pub height: Option<i64>,
}

/// Response containing the issued supply through a height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSupplyInfoResponse {
    /// Last height included (genesis through `height`).
    pub height: u64,
    /// Total subsidy issued, in whole DGB.
    pub total: serde_json::Value,
    /// Total subsidy issued, in sats.
    pub total_sats: u64,
}

/// Handle a GetSupplyInfo request.
pub async fn handle_get_supply_info(
    request: GetSupplyInfoRequest,
    resolver: &RewardResolver,
    chain: &dyn ChainView,
) -> Result<GetSupplyInfoResponse, RpcError> {
    let height = height_or_tip(request.height, chain).await?;
    let height = u64::try_from(height).map_err(|_| {
        RpcError::invalid_parameter(format!("Block height out of range: {}", height))
    })?;

    let total = cumulative_emission(resolver, height.saturating_add(1));
    let total_sats = u64::try_from(total)
        .map_err(|_| RpcError::internal(format!("issued supply {} exceeds u64", total)))?;

    Ok(GetSupplyInfoResponse {
        height,
        total: amount_value(total_sats),
        total_sats,
    })
}
