// crates/dgb-core/src/crypto.rs

use sha2::{Digest, Sha256};

/// A 32-byte block hash.
pub type BlockHash = [u8; 32];

/// The all-zero hash used as the parent of the genesis block.
pub const NULL_HASH: BlockHash = [0u8; 32];

/// Double SHA-256 of arbitrary bytes.
pub fn sha256d(data: &[u8]) -> BlockHash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

/// Deterministic placeholder header hash for a generated block.
///
/// Commits to the parent hash, the height (little-endian), and the coinbase
/// address, so two nodes generating the same blocks agree on every hash.
pub fn block_hash(prev_hash: &BlockHash, height: u64, coinbase_address: &str) -> BlockHash {
    let mut preimage = Vec::with_capacity(32 + 8 + coinbase_address.len());
    preimage.extend_from_slice(prev_hash);
    preimage.extend_from_slice(&height.to_le_bytes());
    preimage.extend_from_slice(coinbase_address.as_bytes());
    sha256d(&preimage)
}

/// Hex-encode a hash in display order (byte-reversed, as block explorers show it).
pub fn hash_to_hex(hash: &BlockHash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256d_empty() {
        // Well-known double SHA-256 of the empty string.
        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_block_hash_is_deterministic() {
        let a = block_hash(&NULL_HASH, 1, "dgbrt1qexample");
        let b = block_hash(&NULL_HASH, 1, "dgbrt1qexample");
        assert_eq!(a, b);
    }

    #[test]
    fn test_block_hash_commits_to_height_and_address() {
        let base = block_hash(&NULL_HASH, 1, "addr");
        assert_ne!(base, block_hash(&NULL_HASH, 2, "addr"));
        assert_ne!(base, block_hash(&NULL_HASH, 1, "other"));
    }

    #[test]
    fn test_hash_to_hex_reverses_bytes() {
        let mut hash = [0u8; 32];
        hash[0] = 0xab;
        let hex = hash_to_hex(&hash);
        assert!(hex.ends_with("ab"));
        assert_eq!(hex.len(), 64);
    }
}
