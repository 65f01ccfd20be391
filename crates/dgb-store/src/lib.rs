// crates/dgb-store/src/lib.rs
//
// dgb-store: Chain storage for the DGB reward node.
//
// Provides the in-memory best chain the RPC layer reads tip heights from,
// plus regtest block generation. Persistent storage and full validation
// belong to external collaborators.

pub mod memory;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::{InMemoryChain, MAX_GENERATE_BLOCKS};
