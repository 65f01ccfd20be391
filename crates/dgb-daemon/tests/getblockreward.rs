// crates/dgb-daemon/tests/getblockreward.rs
//
// End-to-end tests for the reward RPC surface as the daemon wires it.
//
// These tests use the public APIs of the underlying library crates directly
// (dgb-rpc, dgb-store, dgb-economics, dgb-core) since the daemon is a binary
// crate with no lib.rs. Requests go through the same in-process dispatch the
// tonic service uses.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};

use dgb_core::Network;
use dgb_economics::{schedule_for, RewardResolver};
use dgb_rpc::error::{RPC_INVALID_PARAMETER, RPC_MISC_ERROR};
use dgb_rpc::{DgbRpcServer, JsonRpcRequest, RpcConfig};
use dgb_store::InMemoryChain;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a server over a fresh genesis-only chain for `network`.
fn fresh_server(network: Network) -> DgbRpcServer {
    let resolver = Arc::new(RewardResolver::new(schedule_for(network).unwrap()));
    let chain = Arc::new(InMemoryChain::new(network, &resolver));
    let config = RpcConfig {
        host: "127.0.0.1".to_string(),
        port: network.default_rpc_port(),
    };
    DgbRpcServer::new(config, resolver, chain).with_start_time(Instant::now())
}

/// Call `method` and return its result, panicking on an RPC error.
async fn call(server: &DgbRpcServer, method: &str, params: Value) -> Value {
    let resp = server.handle(JsonRpcRequest::new(method, params)).await;
    assert!(resp.success, "{} failed: {:?}", method, resp.error);
    resp.result.unwrap()
}

/// Call `method` and return its error code, panicking on success.
async fn call_err(server: &DgbRpcServer, method: &str, params: Value) -> i32 {
    let resp = server.handle(JsonRpcRequest::new(method, params)).await;
    assert!(!resp.success, "{} unexpectedly succeeded", method);
    resp.error.unwrap().code
}

// ===========================================================================
// 1. Block reward after generating 101 regtest blocks
// ===========================================================================

#[tokio::test]
async fn test_getblockreward_after_101_blocks() {
    let server = fresh_server(Network::Regtest);

    let generated = call(
        &server,
        "generatetoaddress",
        json!({"nblocks": 101, "address": "dgbrt1qrewardtest"}),
    )
    .await;
    assert_eq!(generated["hashes"].as_array().unwrap().len(), 101);

    let count = call(&server, "getblockcount", json!({})).await;
    assert_eq!(count["blocks"], json!(101));

    let reward = call(&server, "getblockreward", json!({})).await;
    assert_eq!(reward["blockreward"], json!(72000));
    assert_eq!(reward["subsidy_sats"], json!(7_200_000_000_000u64));
    assert_eq!(reward["height"], json!(101));
}

// ===========================================================================
// 2. Re-query stability
// ===========================================================================

#[tokio::test]
async fn test_repeated_queries_agree() {
    let server = fresh_server(Network::Regtest);
    call(
        &server,
        "generatetoaddress",
        json!({"nblocks": 101, "address": "dgbrt1qrewardtest"}),
    )
    .await;

    let first = call(&server, "getblockreward", Value::Null).await;
    for _ in 0..5 {
        let again = call(&server, "getblockreward", Value::Null).await;
        assert_eq!(again, first);
    }

    let explicit = call(&server, "getblockreward", json!({"height": 101})).await;
    assert_eq!(explicit["blockreward"], first["blockreward"]);
}

#[tokio::test]
async fn test_concurrent_queries_agree() {
    let server = Arc::new(fresh_server(Network::Regtest));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let server = server.clone();
        tasks.push(tokio::spawn(async move {
            call(&server, "getblockreward", json!({"height": 1_500})).await
        }));
    }
    for task in tasks {
        let result = task.await.unwrap();
        assert_eq!(result["blockreward"], json!(16000));
    }
}

// ===========================================================================
// 3. Errors
// ===========================================================================

#[tokio::test]
async fn test_negative_height_rejected() {
    let server = fresh_server(Network::Regtest);
    let code = call_err(&server, "getblockreward", json!({"height": -1})).await;
    assert_eq!(code, RPC_INVALID_PARAMETER);
}

#[tokio::test]
async fn test_generate_refused_on_mainnet() {
    let server = fresh_server(Network::Main);
    let code = call_err(
        &server,
        "generatetoaddress",
        json!({"nblocks": 1, "address": "dgb1qminer"}),
    )
    .await;
    assert_eq!(code, RPC_MISC_ERROR);

    let count = call(&server, "getblockcount", json!({})).await;
    assert_eq!(count["blocks"], json!(0));
}

// ===========================================================================
// 4. Schedule and supply views
// ===========================================================================

#[tokio::test]
async fn test_schedule_and_supply_views() {
    let server = fresh_server(Network::Regtest);

    let schedule = call(&server, "getemissionschedule", json!({})).await;
    assert_eq!(schedule["network"], json!("regtest"));
    let eras = schedule["eras"].as_array().unwrap();
    assert_eq!(eras[0]["base_reward"], json!(8000));
    assert_eq!(eras[1]["base_reward"], json!(72000));

    // Genesis plus 101 launch-era blocks.
    let supply = call(&server, "getsupplyinfo", json!({"height": 101})).await;
    assert_eq!(supply["total"], json!(8000 + 101 * 72000));

    let hash = call(&server, "getblockhash", json!({"height": 0})).await;
    let best = call(&server, "getbestblockhash", json!({})).await;
    assert_eq!(hash["hash"], best["hash"]);
}
