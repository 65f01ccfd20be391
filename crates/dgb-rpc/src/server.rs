// crates/dgb-rpc/src/server.rs
//
// RPC server setup: DgbRpcServer and RpcConfig.
//
// Uses a JSON-RPC-over-tonic approach. A single tonic unary service
// accepts JSON-encoded requests with a method field, dispatches to the
// appropriate handler, and returns JSON-encoded responses.
//
// This avoids the need for proto codegen while still using tonic's server
// infrastructure for transport and middleware.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use tonic::transport::Server;
use tonic::Status;

use dgb_core::Network;
use dgb_economics::RewardResolver;
use dgb_store::InMemoryChain;

use crate::error::{RpcError, RPC_INVALID_PARAMS, RPC_METHOD_NOT_FOUND, RPC_PARSE_ERROR};
use crate::handlers;
use crate::middleware;

/// Path clients POST JSON envelopes to.
pub const CALL_PATH: &str = "/dgb.rpc.DgbService/Call";

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the RPC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: Network::Main.default_rpc_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

/// A JSON-RPC-style request envelope.
/// The client sends a method name and a JSON params payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The RPC method to invoke (e.g., "getblockreward").
    pub method: String,
    /// JSON-encoded parameters for the method. Omitted or `null` means `{}`.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC-style response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// The result data (if success).
    pub result: Option<serde_json::Value>,
    /// Error code and message (if not success).
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    fn failure(error: RpcError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

// ---------------------------------------------------------------------------
// DgbRpcServer
// ---------------------------------------------------------------------------

/// The main RPC server for the node.
///
/// Holds Arc references to the resolver and chain store and exposes a
/// tonic-based server with JSON-RPC dispatching.
#[derive(Clone)]
pub struct DgbRpcServer {
    /// Server configuration.
    config: RpcConfig,
    /// Network the node runs on.
    network: Network,
    /// Validated monetary policy.
    resolver: Arc<RewardResolver>,
    /// Best chain.
    chain: Arc<InMemoryChain>,
    /// Daemon start time for uptime calculation.
    start_time: Option<Instant>,
}

impl std::fmt::Debug for DgbRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DgbRpcServer")
            .field("config", &self.config)
            .field("network", &self.network)
            .finish()
    }
}

impl DgbRpcServer {
    /// Create a new DgbRpcServer.
    ///
    /// # Arguments
    /// * `config` - Server configuration (host, port).
    /// * `resolver` - Shared reward resolver built from a validated schedule.
    /// * `chain` - Shared best chain; its network decides whether block
    ///   generation is enabled.
    pub fn new(
        config: RpcConfig,
        resolver: Arc<RewardResolver>,
        chain: Arc<InMemoryChain>,
    ) -> Self {
        Self {
            config,
            network: chain.network(),
            resolver,
            chain,
            start_time: None,
        }
    }

    /// Set the daemon start time for uptime calculation.
    pub fn with_start_time(mut self, st: Instant) -> Self {
        self.start_time = Some(st);
        self
    }

    fn service(&self) -> DgbServiceImpl {
        DgbServiceImpl {
            network: self.network,
            resolver: self.resolver.clone(),
            chain: self.chain.clone(),
            start_time: self.start_time,
        }
    }

    /// Dispatch a request in-process, without going through the transport.
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        self.service().dispatch(request).await
    }

    /// Start the RPC server and serve until `shutdown` resolves.
    ///
    /// Binds to the configured address; bind and transport failures are
    /// returned to the caller.
    pub async fn start_with_shutdown<F>(
        &self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        tracing::info!("DGB RPC server starting on {} ({})", addr, self.network);

        Server::builder()
            .accept_http1(true)
            .add_service(tonic::service::interceptor::InterceptedService::new(
                DgbJsonRpcServer::new(self.service()),
                middleware::logging_interceptor,
            ))
            .serve_with_shutdown(addr, shutdown)
            .await?;

        tracing::info!("DGB RPC server stopped");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Service Definition (manual, no proto codegen)
// ---------------------------------------------------------------------------

/// The internal service implementation that holds shared state
/// and dispatches JSON-RPC calls to the appropriate handler.
#[derive(Clone)]
struct DgbServiceImpl {
    network: Network,
    resolver: Arc<RewardResolver>,
    chain: Arc<InMemoryChain>,
    start_time: Option<Instant>,
}

impl DgbServiceImpl {
    /// Dispatch a JSON-RPC request to the appropriate handler based on the method name.
    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let started = Instant::now();
        let method = request.method;
        let params = request.params;

        let result = match method.as_str() {
            // Monetary policy
            "getblockreward" => {
                let resolver = self.resolver.clone();
                let chain = self.chain.clone();
                dispatch_handler(params, |r| async move {
                    handlers::reward::handle_get_block_reward(r, &resolver, chain.as_ref()).await
                })
                .await
            }
            "getemissionschedule" => {
                let resolver = self.resolver.clone();
                let network = self.network;
                dispatch_handler(params, |r| async move {
                    handlers::reward::handle_get_emission_schedule(r, &resolver, network).await
                })
                .await
            }
            "getsupplyinfo" => {
                let resolver = self.resolver.clone();
                let chain = self.chain.clone();
                dispatch_handler(params, |r| async move {
                    handlers::reward::handle_get_supply_info(r, &resolver, chain.as_ref()).await
                })
                .await
            }

            // Chain
            "getblockcount" => {
                let chain = self.chain.clone();
                dispatch_handler(params, |r| async move {
                    handlers::chain::handle_get_block_count(r, chain.as_ref()).await
                })
                .await
            }
            "getbestblockhash" => {
                let chain = self.chain.clone();
                dispatch_handler(params, |r| async move {
                    handlers::chain::handle_get_best_block_hash(r, chain.as_ref()).await
                })
                .await
            }
            "getblockhash" => {
                let chain = self.chain.clone();
                dispatch_handler(params, |r| async move {
                    handlers::chain::handle_get_block_hash(r, chain.as_ref()).await
                })
                .await
            }
            "generatetoaddress" => {
                let chain = self.chain.clone();
                let resolver = self.resolver.clone();
                dispatch_handler(params, |r| async move {
                    handlers::chain::handle_generate_to_address(r, &chain, &resolver).await
                })
                .await
            }

            // Node
            "getnodeinfo" => {
                let chain = self.chain.clone();
                let network = self.network;
                let start_time = self.start_time;
                dispatch_handler(params, |r| async move {
                    handlers::node::handle_get_node_info(r, network, chain.as_ref(), start_time)
                        .await
                })
                .await
            }
            "gethealth" => {
                let resolver = self.resolver.clone();
                let chain = self.chain.clone();
                dispatch_handler(params, |r| async move {
                    handlers::node::handle_get_health(r, &resolver, chain.as_ref()).await
                })
                .await
            }

            _ => Err(RpcError::new(
                RPC_METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        };

        middleware::log_outcome(&method, &result, started.elapsed());

        match result {
            Ok(value) => JsonRpcResponse {
                success: true,
                result: Some(value),
                error: None,
            },
            Err(err) => JsonRpcResponse::failure(err),
        }
    }
}

/// Generic dispatch helper: deserialize params into a request type,
/// call the handler, and serialize the result to JSON.
async fn dispatch_handler<Req, Resp, F, Fut>(
    params: serde_json::Value,
    handler: F,
) -> Result<serde_json::Value, RpcError>
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Resp, RpcError>>,
{
    let params = match params {
        serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
        other => other,
    };
    let request: Req = serde_json::from_value(params).map_err(|e| {
        RpcError::new(RPC_INVALID_PARAMS, format!("Failed to deserialize request: {}", e))
    })?;
    let response = handler(request).await?;
    serde_json::to_value(response)
        .map_err(|e| RpcError::internal(format!("Failed to serialize response: {}", e)))
}

// ---------------------------------------------------------------------------
// Tonic Service Wiring
// ---------------------------------------------------------------------------
// We define a single service with one method: `Call`.
// The request and response are raw bytes (JSON-encoded JsonRpcRequest/Response).

/// The tonic service wrapper. Implements the low-level service
/// by accepting bytes, deserializing as JSON-RPC, and dispatching.
#[derive(Clone)]
pub struct DgbJsonRpcServer {
    inner: DgbServiceImpl,
}

impl std::fmt::Debug for DgbJsonRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DgbJsonRpcServer").finish()
    }
}

impl DgbJsonRpcServer {
    fn new(inner: DgbServiceImpl) -> Self {
        Self { inner }
    }
}

impl tonic::server::NamedService for DgbJsonRpcServer {
    const NAME: &'static str = "dgb.rpc.DgbService";
}

impl<B> tower_service::Service<http::Request<B>> for DgbJsonRpcServer
where
    B: HttpBody + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
    B::Data: Send,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            let body_bytes = match collect_body(req.into_body()).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!("Failed to read request body: {}", e);
                    let resp = JsonRpcResponse::failure(RpcError::new(
                        RPC_PARSE_ERROR,
                        format!("Failed to read request body: {}", e),
                    ));
                    return Ok(build_response(serde_json::to_vec(&resp).unwrap_or_default()));
                }
            };

            let rpc_request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
                Ok(r) => r,
                Err(e) => {
                    let resp = JsonRpcResponse::failure(RpcError::new(
                        RPC_PARSE_ERROR,
                        format!("Invalid JSON-RPC request: {}", e),
                    ));
                    return Ok(build_response(serde_json::to_vec(&resp).unwrap_or_default()));
                }
            };

            let rpc_response = inner.dispatch(rpc_request).await;
            let json = serde_json::to_vec(&rpc_response).unwrap_or_default();
            Ok(build_response(json))
        })
    }
}

/// Collect the body of an HTTP request into bytes.
async fn collect_body<B>(body: B) -> Result<Vec<u8>, String>
where
    B: HttpBody + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    B::Data: Send,
{
    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    loop {
        match std::future::poll_fn(|cx| HttpBody::poll_frame(body.as_mut(), cx)).await {
            Some(Ok(frame)) => {
                if let Ok(data) = frame.into_data() {
                    use bytes::Buf;
                    collected.extend_from_slice(data.chunk());
                }
            }
            Some(Err(e)) => return Err(e.into().to_string()),
            None => break,
        }
    }

    Ok(collected)
}

/// Build an HTTP response with the given JSON body.
fn build_response(json: Vec<u8>) -> http::Response<tonic::body::BoxBody> {
    let body = tonic::body::BoxBody::new(
        http_body_util::Full::new(bytes::Bytes::from(json))
            .map_err(|e| Status::internal(format!("body error: {}", e))),
    );

    let mut response = http::Response::new(body);
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}
