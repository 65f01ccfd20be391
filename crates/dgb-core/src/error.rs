use thiserror::Error;

/// Node-wide error types shared by the store, RPC, and daemon crates.
#[derive(Debug, Error)]
pub enum DgbError {
    /// Chain store failure (lock poisoning, missing genesis).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Consensus rule violation (reward mismatch, malformed monetary policy).
    #[error("Consensus error: {0}")]
    Consensus(String),

    /// A caller-supplied argument was rejected.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation not permitted in the current node state or network.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
