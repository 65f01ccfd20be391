// crates/dgb-core/src/block.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{hash_to_hex, BlockHash};

/// A block on the node's best chain, as far as reward queries care.
///
/// Only the fields needed to answer height and subsidy questions are kept;
/// transactions and proof-of-work live with external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Height of this block (genesis = 0).
    pub height: u64,
    /// Header hash.
    pub hash: BlockHash,
    /// Parent header hash (all zeroes for genesis).
    pub prev_hash: BlockHash,
    /// Address credited by the coinbase.
    pub coinbase_address: String,
    /// Subsidy paid by the coinbase, in sats.
    pub subsidy: u64,
    /// Time the block was appended locally.
    pub time: DateTime<Utc>,
}

impl BlockRecord {
    /// Header hash in display hex.
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }
}
