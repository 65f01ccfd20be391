// crates/dgb-core/src/traits.rs

use async_trait::async_trait;

use crate::block::BlockRecord;
use crate::error::DgbError;

/// Read-only view of the node's best chain.
///
/// Implemented by dgb-store. Reward computation never holds one of these:
/// callers resolve the tip to a height first and pass the plain value on.
#[async_trait]
pub trait ChainView: Send + Sync {
    /// Height of the current best-chain tip.
    async fn tip_height(&self) -> Result<u64, DgbError>;

    /// The tip block itself.
    async fn tip(&self) -> Result<BlockRecord, DgbError>;

    /// The block at `height`, or `None` if the chain is shorter.
    async fn block_at(&self, height: u64) -> Result<Option<BlockRecord>, DgbError>;
}
