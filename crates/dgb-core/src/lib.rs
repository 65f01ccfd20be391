// crates/dgb-core/src/lib.rs
//
// dgb-core: Core types, traits, and hashing primitives for the DGB reward node.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the network identifiers, block records, the read-only chain
// trait, and the shared error type.

pub mod block;
pub mod crypto;
pub mod error;
pub mod network;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use dgb_core::Network;`
pub use block::BlockRecord;
pub use crypto::{block_hash, hash_to_hex, BlockHash, NULL_HASH};
pub use error::DgbError;
pub use network::Network;
pub use traits::ChainView;
