//! Bridge Protocol - Wire Types
//!
//! JSON-RPC 2.0 types spoken on both sides of the provider bridge.
//! This crate is the single source of truth for the request and response
//! shapes, the wire-level error object, provider messages and the
//! `data` events republished to legacy listeners.

pub mod error;
pub mod jsonrpc;
pub mod notifications;

pub use error::{DEFAULT_ERROR_CODE, ErrorInfo, ProviderError, RpcFailure};
pub use jsonrpc::{
    JSONRPC_VERSION, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse,
    JsonRpcSuccessResponse, Payload, Reply, RequestId,
};
pub use notifications::{DATA_EVENT, DataEvent, ETH_SUBSCRIPTION, ProviderMessage};
