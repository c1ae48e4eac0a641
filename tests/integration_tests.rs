//! End-to-end tests: legacy JSON payloads in, legacy JSON replies and
//! `data` events out, through an in-process provider that behaves like a
//! small Ethereum node.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;
use web3_bridge::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-process node: a block counter, subscriptions, and a switch to
/// simulate a dead link.
struct TestNode {
    listeners: MessageListeners,
    block: AtomicU64,
    next_subscription: AtomicU64,
    subscriptions: Mutex<Vec<String>>,
    offline: AtomicBool,
}

impl TestNode {
    fn start() -> Arc<Self> {
        Arc::new(Self {
            listeners: MessageListeners::new(),
            block: AtomicU64::new(0),
            next_subscription: AtomicU64::new(1),
            subscriptions: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        })
    }

    /// Mine a block and notify every `newHeads` subscription.
    fn mine(&self) {
        let number = self.block.fetch_add(1, Ordering::SeqCst) + 1;
        let subscriptions = self.subscriptions.lock().clone();
        for id in subscriptions {
            self.listeners.emit(&ProviderMessage::subscription(json!({
                "subscription": id,
                "result": { "number": format!("{number:#x}") },
            })));
        }
        self.listeners.emit(&ProviderMessage::new("blockMined", json!(number)));
    }
}

impl Provider for TestNode {
    async fn send(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ProviderError::transport("connect ECONNREFUSED 127.0.0.1:8545"));
        }

        match method {
            "eth_chainId" => Ok(json!("0x7a69")),
            "eth_blockNumber" => Ok(json!(format!("{:#x}", self.block.load(Ordering::SeqCst)))),
            "evm_mine" => {
                self.mine();
                Ok(json!("0x0"))
            }
            "eth_subscribe" if params.first() == Some(&json!("newHeads")) => {
                let id = format!("{:#x}", self.next_subscription.fetch_add(1, Ordering::SeqCst));
                self.subscriptions.lock().push(id.clone());
                Ok(json!(id))
            }
            "eth_subscribe" => Err(ProviderError::Rpc(
                RpcFailure::new(-32602, "Unsupported subscription type")
                    .with_name("InvalidArgumentsError"),
            )),
            _ => Err(ProviderError::Rpc(
                RpcFailure::new(-32601, format!("Method {method} is not supported"))
                    .with_name("MethodNotFoundError"),
            )),
        }
    }

    fn on_message(&self, listener: MessageListener) {
        self.listeners.add(listener);
    }
}

/// Drive the callback entry point with a raw JSON payload.
async fn send_json(adapter: &ProviderAdapter<TestNode>, wire: Value) -> Result<Value, BridgeError> {
    let payload: Payload = serde_json::from_value(wire).unwrap();
    let (tx, rx) = oneshot::channel();
    adapter.send(payload, move |outcome| {
        let _ = tx.send(outcome);
    });
    let outcome = timeout(Duration::from_secs(5), rx).await.unwrap().unwrap();
    outcome.map(|reply| serde_json::to_value(reply).unwrap())
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn single_request_roundtrip() {
    init_tracing();
    let adapter = ProviderAdapter::new(TestNode::start());

    let reply = send_json(&adapter, json!({
        "jsonrpc": "2.0", "method": "eth_chainId", "params": [], "id": 1
    }))
    .await
    .unwrap();

    assert_eq!(reply, json!({"jsonrpc": "2.0", "id": 1, "result": "0x7a69"}));
}

#[tokio::test]
async fn unsupported_method_is_an_error_response() {
    let adapter = ProviderAdapter::with_config(
        TestNode::start(),
        AdapterConfig::default().without_error_diagnostics(),
    );

    let reply = send_json(&adapter, json!({
        "jsonrpc": "2.0", "method": "eth_mining", "params": [], "id": 2
    }))
    .await
    .unwrap();

    assert_eq!(
        reply,
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {"code": -32601, "message": "Method eth_mining is not supported"}
        })
    );
}

#[tokio::test]
async fn error_diagnostics_are_attached_by_default() {
    let adapter = ProviderAdapter::new(TestNode::start());

    let reply = send_json(&adapter, json!({
        "jsonrpc": "2.0", "method": "eth_subscribe", "params": ["logs"], "id": 3
    }))
    .await
    .unwrap();

    assert_eq!(reply["error"]["code"], -32602);
    assert_eq!(reply["error"]["data"]["name"], "InvalidArgumentsError");
    assert!(reply["error"]["data"]["stack"].is_null());
}

#[tokio::test]
async fn batch_observes_earlier_requests() {
    let adapter = ProviderAdapter::new(TestNode::start());

    let reply = send_json(&adapter, json!([
        {"jsonrpc": "2.0", "method": "evm_mine", "params": [], "id": 1},
        {"jsonrpc": "2.0", "method": "evm_mine", "params": [], "id": 2},
        {"jsonrpc": "2.0", "method": "eth_blockNumber", "params": [], "id": 3}
    ]))
    .await
    .unwrap();

    let responses = reply.as_array().unwrap();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[2], json!({"jsonrpc": "2.0", "id": 3, "result": "0x2"}));
}

#[tokio::test]
async fn batch_stops_at_first_error() {
    let node = TestNode::start();
    let adapter = ProviderAdapter::new(node.clone());

    let reply = send_json(&adapter, json!([
        {"jsonrpc": "2.0", "method": "eth_chainId", "params": [], "id": 1},
        {"jsonrpc": "2.0", "method": "eth_unknown", "params": [], "id": 2},
        {"jsonrpc": "2.0", "method": "evm_mine", "params": [], "id": 3}
    ]))
    .await
    .unwrap();

    let responses = reply.as_array().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[1]["id"], 2);
    assert!(responses[1].get("error").is_some());
    // evm_mine never ran
    assert_eq!(node.block.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn offline_provider_surfaces_transport_failure() {
    let node = TestNode::start();
    node.offline.store(true, Ordering::SeqCst);
    let adapter = ProviderAdapter::new(node);

    let single = send_json(&adapter, json!({
        "jsonrpc": "2.0", "method": "eth_chainId", "params": [], "id": 1
    }))
    .await;
    assert!(matches!(single, Err(BridgeError::Transport(_))));

    let batch = send_json(&adapter, json!([
        {"jsonrpc": "2.0", "method": "eth_chainId", "params": [], "id": 1}
    ]))
    .await;
    let err = batch.unwrap_err();
    assert!(err.to_string().contains("ECONNREFUSED"));
    assert!(adapter.is_connected());
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscriptions
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn new_heads_arrive_as_data_events() {
    let node = TestNode::start();
    let adapter = ProviderAdapter::new(node.clone());
    let mut events = adapter.subscribe();
    assert_eq!(adapter.listener_count(), 1);

    let reply = send_json(&adapter, json!({
        "jsonrpc": "2.0", "method": "eth_subscribe", "params": ["newHeads"], "id": 1
    }))
    .await
    .unwrap();
    let subscription = reply["result"].as_str().unwrap().to_string();

    send_json(&adapter, json!({
        "jsonrpc": "2.0", "method": "evm_mine", "params": [], "id": 2
    }))
    .await
    .unwrap();

    let event = timeout(Duration::from_secs(5), events.recv()).await.unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({
            "method": "eth_subscription",
            "params": {"subscription": subscription, "result": {"number": "0x1"}}
        })
    );

    // blockMined is not a subscription message
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn every_clone_shares_the_event_stream() {
    let node = TestNode::start();
    let adapter = ProviderAdapter::new(node.clone());
    let other = adapter.clone();
    let mut a = adapter.subscribe();
    let mut b = other.subscribe();

    node.subscriptions.lock().push("0x1".into());
    node.mine();

    assert_eq!(a.recv().await.unwrap().method, ETH_SUBSCRIPTION);
    assert_eq!(b.recv().await.unwrap().method, ETH_SUBSCRIPTION);
    // Cloning does not register a second provider listener
    assert_eq!(node.listeners.len(), 1);
}
