// crates/dgb-rpc/src/handlers/node.rs
//
// Node info and health handlers: GetNodeInfo, GetHealth.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use dgb_core::traits::ChainView;
use dgb_core::Network;
use dgb_economics::RewardResolver;

use crate::error::RpcError;

// ---------------------------------------------------------------------------
// GetNodeInfo
// ---------------------------------------------------------------------------

/// Request for node information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetNodeInfoRequest {}

/// Response containing node information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNodeInfoResponse {
    /// Network the node is running on.
    pub network: Network,
    /// Software version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Height of the best-chain tip.
    pub blocks: u64,
    /// Whether `generatetoaddress` is enabled.
    pub generate_enabled: bool,
}

/// Handle a GetNodeInfo request.
pub async fn handle_get_node_info(
    _request: GetNodeInfoRequest,
    network: Network,
    chain: &dyn ChainView,
    start_time: Option<Instant>,
) -> Result<GetNodeInfoResponse, RpcError> {
    let uptime_seconds = start_time.map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Ok(GetNodeInfoResponse {
        network,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        blocks: chain.tip_height().await?,
        generate_enabled: network.allows_generate(),
    })
}

// ---------------------------------------------------------------------------
// GetHealth
// ---------------------------------------------------------------------------

/// Request for node health status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetHealthRequest {}

/// Response containing node health information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHealthResponse {
    /// Overall health: "healthy" or "unhealthy".
    pub status: String,
    /// Whether the chain store answered a tip query.
    pub chain_ok: bool,
    /// Number of eras in the loaded emission schedule.
    pub schedule_eras: usize,
    /// Human-readable details.
    pub details: Option<String>,
}

/// Handle a GetHealth request.
///
/// A store failure is reported in the body rather than as an RPC error.
pub async fn handle_get_health(
    _request: GetHealthRequest,
    resolver: &RewardResolver,
    chain: &dyn ChainView,
) -> Result<GetHealthResponse, RpcError> {
    let (chain_ok, details) = match chain.tip_height().await {
        Ok(height) => (true, format!("Best chain at height {}", height)),
        Err(e) => (false, e.to_string()),
    };

    Ok(GetHealthResponse {
        status: if chain_ok { "healthy" } else { "unhealthy" }.to_string(),
        chain_ok,
        schedule_eras: resolver.schedule().len(),
        details: Some(details),
    })
}
