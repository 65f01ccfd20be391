// crates/dgb-cli/src/rpc_client.rs
//
// Lightweight JSON-RPC client that POSTs to the dgbd HTTP endpoint.

use dgb_rpc::{JsonRpcRequest, JsonRpcResponse, CALL_PATH};
use thiserror::Error;

/// Errors from a CLI-side RPC call.
#[derive(Debug, Error)]
pub enum RpcClientError {
    #[error("cannot reach daemon at {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("error code {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("daemon returned neither a result nor an error")]
    EmptyResponse,
}

/// Full URL of the call endpoint under `endpoint`.
pub fn call_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), CALL_PATH)
}

/// Send a JSON-RPC call to the daemon and return the parsed response.
pub async fn rpc_call(
    endpoint: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<JsonRpcResponse, RpcClientError> {
    let request = JsonRpcRequest::new(method, params);
    let transport = |source| RpcClientError::Transport {
        endpoint: endpoint.to_string(),
        source,
    };

    let client = reqwest::Client::new();
    let resp = client
        .post(call_url(endpoint))
        .json(&request)
        .send()
        .await
        .map_err(transport)?;

    resp.json::<JsonRpcResponse>().await.map_err(transport)
}

/// Send a call and unwrap the envelope into its result value.
pub async fn rpc_result(
    endpoint: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcClientError> {
    let resp = rpc_call(endpoint, method, params).await?;
    match (resp.result, resp.error) {
        (_, Some(err)) => Err(RpcClientError::Rpc {
            code: err.code,
            message: err.message,
        }),
        (Some(result), None) => Ok(result),
        (None, None) => Err(RpcClientError::EmptyResponse),
    }
}
