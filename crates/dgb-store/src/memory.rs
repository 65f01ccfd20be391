// crates/dgb-store/src/memory.rs
//
// In-memory best chain implementing the `ChainView` trait.
//
// Starts from a genesis block whose coinbase pays the schedule's height-0
// reward. On regtest, `generate_to_address` appends blocks without
// proof-of-work; each block's subsidy comes from the reward resolver for its
// own height, never from the tip at the time of the call.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use dgb_core::block::BlockRecord;
use dgb_core::crypto::{block_hash, NULL_HASH};
use dgb_core::error::DgbError;
use dgb_core::network::Network;
use dgb_core::traits::ChainView;
use dgb_economics::RewardResolver;

/// Upper bound on blocks appended by a single `generate_to_address` call.
pub const MAX_GENERATE_BLOCKS: u64 = 1_000;

/// Coinbase address recorded on the genesis block.
const GENESIS_ADDRESS: &str = "genesis";

/// The best chain, held entirely in memory.
#[derive(Debug)]
pub struct InMemoryChain {
    network: Network,
    /// Blocks indexed by height; never empty.
    blocks: RwLock<Vec<BlockRecord>>,
}

impl InMemoryChain {
    /// Create a fresh chain containing only the genesis block.
    pub fn new(network: Network, resolver: &RewardResolver) -> Self {
        let genesis = BlockRecord {
            height: 0,
            hash: block_hash(&NULL_HASH, 0, GENESIS_ADDRESS),
            prev_hash: NULL_HASH,
            coinbase_address: GENESIS_ADDRESS.to_string(),
            subsidy: resolver.reward_at_height(0),
            time: Utc::now(),
        };
        tracing::debug!(
            "Initialized {} chain with genesis {}",
            network,
            genesis.hash_hex()
        );
        Self {
            network,
            blocks: RwLock::new(vec![genesis]),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Append `count` blocks paying `address`, returning the new blocks.
    ///
    /// Regtest only. Fails without appending anything if the network does not
    /// allow generation, the address is blank, or `count` exceeds
    /// [`MAX_GENERATE_BLOCKS`].
    pub async fn generate_to_address(
        &self,
        count: u64,
        address: &str,
        resolver: &RewardResolver,
    ) -> Result<Vec<BlockRecord>, DgbError> {
        if !self.network.allows_generate() {
            return Err(DgbError::InvalidState(format!(
                "block generation is disabled on {}",
                self.network
            )));
        }
        let address = address.trim();
        if address.is_empty() {
            return Err(DgbError::InvalidParameter(
                "coinbase address must not be empty".to_string(),
            ));
        }
        if count > MAX_GENERATE_BLOCKS {
            return Err(DgbError::InvalidParameter(format!(
                "cannot generate {} blocks in one call (max {})",
                count, MAX_GENERATE_BLOCKS
            )));
        }

        let mut blocks = self.blocks.write().await;
        let mut appended = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let parent = blocks
                .last()
                .ok_or_else(|| DgbError::Storage("chain has no genesis block".to_string()))?;
            let height = parent.height + 1;
            let block = BlockRecord {
                height,
                hash: block_hash(&parent.hash, height, address),
                prev_hash: parent.hash,
                coinbase_address: address.to_string(),
                subsidy: resolver.reward_at_height(height),
                time: Utc::now(),
            };
            appended.push(block.clone());
            blocks.push(block);
        }

        if let Some(tip) = appended.last() {
            tracing::info!(
                "Generated {} blocks to {}; new tip {} at height {}",
                appended.len(),
                address,
                tip.hash_hex(),
                tip.height
            );
        }

        Ok(appended)
    }

    /// Number of blocks, genesis included.
    pub async fn len(&self) -> usize {
        self.blocks.read().await.len()
    }

    /// Always false: the chain holds at least the genesis block.
    pub async fn is_empty(&self) -> bool {
        self.blocks.read().await.is_empty()
    }
}

#[async_trait]
impl ChainView for InMemoryChain {
    async fn tip_height(&self) -> Result<u64, DgbError> {
        Ok(self.tip().await?.height)
    }

    async fn tip(&self) -> Result<BlockRecord, DgbError> {
        self.blocks
            .read()
            .await
            .last()
            .cloned()
            .ok_or_else(|| DgbError::Storage("chain has no genesis block".to_string()))
    }

    async fn block_at(&self, height: u64) -> Result<Option<BlockRecord>, DgbError> {
        let blocks = self.blocks.read().await;
        Ok(usize::try_from(height)
            .ok()
            .and_then(|h| blocks.get(h))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dgb_economics::params::{GENESIS_REWARD, LAUNCH_REWARD};
    use dgb_economics::schedule_for;

    fn regtest() -> (InMemoryChain, RewardResolver) {
        let resolver = RewardResolver::new(schedule_for(Network::Regtest).unwrap());
        (InMemoryChain::new(Network::Regtest, &resolver), resolver)
    }

    #[tokio::test]
    async fn test_fresh_chain_has_only_genesis() {
        let (chain, _) = regtest();
        assert_eq!(chain.tip_height().await.unwrap(), 0);
        assert_eq!(chain.len().await, 1);
        let genesis = chain.block_at(0).await.unwrap().unwrap();
        assert!(genesis.is_genesis());
        assert_eq!(genesis.subsidy, GENESIS_REWARD);
        assert_eq!(genesis.prev_hash, NULL_HASH);
    }

    #[tokio::test]
    async fn test_generate_advances_tip() {
        let (chain, resolver) = regtest();
        let blocks = chain
            .generate_to_address(101, "dgbrt1qminer", &resolver)
            .await
            .unwrap();
        assert_eq!(blocks.len(), 101);
        assert_eq!(chain.tip_height().await.unwrap(), 101);
        assert_eq!(blocks.last().unwrap().subsidy, LAUNCH_REWARD);
    }

    #[tokio::test]
    async fn test_generated_blocks_link_to_parents() {
        let (chain, resolver) = regtest();
        chain
            .generate_to_address(5, "dgbrt1qminer", &resolver)
            .await
            .unwrap();
        for h in 1..=5 {
            let block = chain.block_at(h).await.unwrap().unwrap();
            let parent = chain.block_at(h - 1).await.unwrap().unwrap();
            assert_eq!(block.prev_hash, parent.hash);
            assert_eq!(block.subsidy, resolver.reward_at_height(h));
        }
    }

    #[tokio::test]
    async fn test_generation_is_deterministic_across_chains() {
        let (a, resolver) = regtest();
        let (b, _) = regtest();
        a.generate_to_address(3, "addr", &resolver).await.unwrap();
        b.generate_to_address(3, "addr", &resolver).await.unwrap();
        assert_eq!(a.tip().await.unwrap().hash, b.tip().await.unwrap().hash);
    }

    #[tokio::test]
    async fn test_generate_rejected_off_regtest() {
        let resolver = RewardResolver::new(schedule_for(Network::Main).unwrap());
        let chain = InMemoryChain::new(Network::Main, &resolver);
        let err = chain
            .generate_to_address(1, "addr", &resolver)
            .await
            .unwrap_err();
        assert!(matches!(err, DgbError::InvalidState(_)));
        assert_eq!(chain.tip_height().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_arguments() {
        let (chain, resolver) = regtest();
        assert!(chain.generate_to_address(1, "  ", &resolver).await.is_err());
        assert!(chain
            .generate_to_address(MAX_GENERATE_BLOCKS + 1, "addr", &resolver)
            .await
            .is_err());
        assert_eq!(chain.tip_height().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_block_above_tip_is_none() {
        let (chain, _) = regtest();
        assert!(chain.block_at(1).await.unwrap().is_none());
        assert!(chain.block_at(u64::MAX).await.unwrap().is_none());
    }
}
