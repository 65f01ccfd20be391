// crates/dgb-rpc/src/handlers/chain.rs
//
// Chain handlers: GetBlockCount, GetBestBlockHash, GetBlockHash, GenerateToAddress.

use serde::{Deserialize, Serialize};

use dgb_core::traits::ChainView;
use dgb_economics::RewardResolver;
use dgb_store::InMemoryChain;

use crate::error::RpcError;

// ---------------------------------------------------------------------------
// GetBlockCount
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlockCountRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlockCountResponse {
    /// Height of the best-chain tip.
    pub blocks: u64,
}

pub async fn handle_get_block_count(
    _request: GetBlockCountRequest,
    chain: &dyn ChainView,
) -> Result<GetBlockCountResponse, RpcError> {
    Ok(GetBlockCountResponse {
        blocks: chain.tip_height().await?,
    })
}

// ---------------------------------------------------------------------------
// GetBestBlockHash / GetBlockHash
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBestBlockHashRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlockHashRequest {
    pub height: i64,
}

/// Response carrying a single block hash in display hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockHashResponse {
    pub hash: String,
    pub height: u64,
}

pub async fn handle_get_best_block_hash(
    _request: GetBestBlockHashRequest,
    chain: &dyn ChainView,
) -> Result<BlockHashResponse, RpcError> {
    let tip = chain.tip().await?;
    Ok(BlockHashResponse {
        hash: tip.hash_hex(),
        height: tip.height,
    })
}

/// Handle a GetBlockHash request.
///
/// Unlike reward queries, this needs the block to exist.
pub async fn handle_get_block_hash(
    request: GetBlockHashRequest,
    chain: &dyn ChainView,
) -> Result<BlockHashResponse, RpcError> {
    let out_of_range =
        || RpcError::invalid_parameter(format!("Block height out of range: {}", request.height));
    let height = u64::try_from(request.height).map_err(|_| out_of_range())?;
    let block = chain.block_at(height).await?.ok_or_else(out_of_range)?;
    Ok(BlockHashResponse {
        hash: block.hash_hex(),
        height: block.height,
    })
}

// ---------------------------------------------------------------------------
// GenerateToAddress
// ---------------------------------------------------------------------------

/// Request to append blocks on regtest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateToAddressRequest {
    /// Number of blocks to generate.
    pub nblocks: u64,
    /// Address credited by each coinbase.
    pub address: String,
}

/// Response listing the generated block hashes, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateToAddressResponse {
    pub hashes: Vec<String>,
}

pub async fn handle_generate_to_address(
    request: GenerateToAddressRequest,
    chain: &InMemoryChain,
    resolver: &RewardResolver,
) -> Result<GenerateToAddressResponse, RpcError> {
    let blocks = chain
        .generate_to_address(request.nblocks, &request.address, resolver)
        .await?;
    Ok(GenerateToAddressResponse {
        hashes: blocks.iter().map(|b| b.hash_hex()).collect(),
    })
}
