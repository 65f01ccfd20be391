// crates/dgb-rpc/src/lib.rs
//
// dgb-rpc: JSON-RPC server and handlers for the DGB node.
//
// Provides a tonic-based RPC server exposing the monetary policy and the
// regtest chain. Requests are JSON envelopes carried over tonic rather
// than protobuf messages.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

// Re-export the main server type for ergonomic access.
pub use error::RpcError;
pub use server::{DgbRpcServer, JsonRpcRequest, JsonRpcResponse, RpcConfig, CALL_PATH};
