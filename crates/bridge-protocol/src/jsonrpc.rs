//! JSON-RPC 2.0 base types for the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ErrorInfo;

/// Version tag carried by every request and response.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request ID. The legacy interface only ever issues numeric ids.
pub type RequestId = i64;

/// JSON-RPC 2.0 request as issued by a legacy caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
    pub id: RequestId,
}

/// JSON-RPC 2.0 success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonRpcSuccessResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    pub result: Value,
}

/// JSON-RPC 2.0 error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    pub error: ErrorInfo,
}

/// JSON-RPC 2.0 response (success or error, never both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcResponse {
    Success(JsonRpcSuccessResponse),
    Error(JsonRpcErrorResponse),
}

/// What a legacy caller hands to `send`: one request or an ordered batch.
///
/// Deserializes from either a JSON object or a JSON array, so the shape on
/// the wire picks the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Single(JsonRpcRequest),
    Batch(Vec<JsonRpcRequest>),
}

/// What a legacy caller gets back, mirroring the [`Payload`] it sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Single(JsonRpcResponse),
    Batch(Vec<JsonRpcResponse>),
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper constructors
// ─────────────────────────────────────────────────────────────────────────────

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
            id,
        }
    }
}

impl JsonRpcSuccessResponse {
    pub fn new(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id,
            result,
        }
    }
}

impl JsonRpcErrorResponse {
    pub fn new(id: RequestId, error: ErrorInfo) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id,
            error,
        }
    }
}

impl JsonRpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self::Success(JsonRpcSuccessResponse::new(id, result))
    }

    pub fn error(id: RequestId, error: ErrorInfo) -> Self {
        Self::Error(JsonRpcErrorResponse::new(id, error))
    }

    pub fn id(&self) -> RequestId {
        match self {
            Self::Success(r) => r.id,
            Self::Error(r) => r.id,
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Success(r) => Some(&r.result),
            Self::Error(_) => None,
        }
    }

    pub fn error_info(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Success(_) => None,
            Self::Error(r) => Some(&r.error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl Payload {
    /// Number of requests carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(requests) => requests.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<JsonRpcRequest> for Payload {
    fn from(request: JsonRpcRequest) -> Self {
        Self::Single(request)
    }
}

impl From<Vec<JsonRpcRequest>> for Payload {
    fn from(requests: Vec<JsonRpcRequest>) -> Self {
        Self::Batch(requests)
    }
}

impl Reply {
    pub fn into_single(self) -> Option<JsonRpcResponse> {
        match self {
            Self::Single(r) => Some(r),
            Self::Batch(_) => None,
        }
    }

    pub fn into_batch(self) -> Option<Vec<JsonRpcResponse>> {
        match self {
            Self::Single(_) => None,
            Self::Batch(r) => Some(r),
        }
    }
}
