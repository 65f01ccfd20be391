// crates/dgb-rpc/src/error.rs
//
// RPC error codes, following the numbering Bitcoin-derived nodes expose so
// existing tooling can interpret them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dgb_core::DgbError;
use dgb_economics::EmissionError;

/// Unspecified failure.
pub const RPC_MISC_ERROR: i32 = -1;
/// Parameter value out of range or otherwise rejected (client error).
pub const RPC_INVALID_PARAMETER: i32 = -8;
/// Method name not recognised.
pub const RPC_METHOD_NOT_FOUND: i32 = -32601;
/// Params object could not be decoded into the method's request type.
pub const RPC_INVALID_PARAMS: i32 = -32602;
/// Server-side failure unrelated to the request.
pub const RPC_INTERNAL_ERROR: i32 = -32603;
/// Envelope was not valid JSON-RPC.
pub const RPC_PARSE_ERROR: i32 = -32700;

/// Error body returned in the `error` field of a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(RPC_INVALID_PARAMETER, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RPC_INTERNAL_ERROR, message)
    }

    /// Whether the caller is at fault (bad request rather than server failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.code,
            RPC_INVALID_PARAMETER | RPC_INVALID_PARAMS | RPC_METHOD_NOT_FOUND | RPC_PARSE_ERROR
        )
    }
}

impl From<EmissionError> for RpcError {
    fn from(e: EmissionError) -> Self {
        match e {
            EmissionError::InvalidHeight(h) => {
                RpcError::invalid_parameter(format!("Block height out of range: {}", h))
            }
            // Schedules are validated before the server starts; reaching this
            // means the node was wired incorrectly.
            EmissionError::MalformedSchedule(msg) => RpcError::internal(msg),
        }
    }
}

impl From<DgbError> for RpcError {
    fn from(e: DgbError) -> Self {
        match e {
            DgbError::InvalidParameter(msg) => RpcError::invalid_parameter(msg),
            DgbError::InvalidState(msg) => RpcError::new(RPC_MISC_ERROR, msg),
            other => RpcError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_height_is_client_error() {
        let err: RpcError = EmissionError::InvalidHeight(-1).into();
        assert_eq!(err.code, RPC_INVALID_PARAMETER);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_malformed_schedule_is_internal() {
        let err: RpcError = EmissionError::MalformedSchedule("gap".to_string()).into();
        assert_eq!(err.code, RPC_INTERNAL_ERROR);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err: RpcError = DgbError::Storage("lock".to_string()).into();
        assert_eq!(err.code, RPC_INTERNAL_ERROR);
    }
}
