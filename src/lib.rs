//! Web3 Bridge: legacy callback-style JSON-RPC over a modern provider.
//!
//! Wrap any [`Provider`] in a [`ProviderAdapter`] and hand the adapter to
//! code that still speaks the callback convention:
//!
//! - `send(payload, callback)` forwards one request or an ordered batch,
//!   folding structured provider failures into JSON-RPC error responses
//! - `subscribe()` yields the `data` events republished from the
//!   provider's subscription messages
//! - `is_connected()` is always true; connectivity belongs to the provider

pub use bridge_adapter::{
    AdapterConfig, BridgeError, DiagnosticSink, ForwardOutcome, ForwardRule, Forwarder,
    ForwardingTable, ProviderAdapter,
};
pub use bridge_protocol::{
    DATA_EVENT, DEFAULT_ERROR_CODE, DataEvent, ETH_SUBSCRIPTION, ErrorInfo, JSONRPC_VERSION,
    JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse, JsonRpcSuccessResponse, Payload,
    ProviderError, ProviderMessage, Reply, RequestId, RpcFailure,
};
pub use bridge_provider::{MessageListener, MessageListeners, Provider};
