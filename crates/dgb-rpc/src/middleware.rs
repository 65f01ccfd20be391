// crates/dgb-rpc/src/middleware.rs
//
// Middleware for the RPC server: transport logging interceptor and
// per-call outcome logging.

use std::time::Duration;

use tonic::{Request, Status};

use crate::error::RpcError;

/// Logging interceptor for tonic gRPC requests.
///
/// Logs the metadata of each incoming request at debug level.
pub fn logging_interceptor(req: Request<()>) -> Result<Request<()>, Status> {
    tracing::debug!("Incoming RPC request: {:?}", req.metadata());
    Ok(req)
}

/// Log the outcome of a dispatched call.
///
/// Client errors (bad parameters, unknown methods) are logged at warn;
/// anything else that fails is logged at error.
pub fn log_outcome<T>(method: &str, result: &Result<T, RpcError>, elapsed: Duration) {
    match result {
        Ok(_) => tracing::info!(method, elapsed_ms = elapsed.as_millis() as u64, "RPC ok"),
        Err(e) if e.is_client_error() => tracing::warn!(
            method,
            code = e.code,
            "RPC rejected: {}",
            e.message
        ),
        Err(e) => tracing::error!(method, code = e.code, "RPC failed: {}", e.message),
    }
}
