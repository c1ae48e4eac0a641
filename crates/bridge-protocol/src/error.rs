//! Wire-level error object and the failures a modern provider can report.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Code used when a structured provider failure carries a falsy code.
pub const DEFAULT_ERROR_CODE: i64 = 404;

/// JSON-RPC 2.0 error object, as embedded in an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorInfo {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON-RPC Error [{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorInfo {}

/// A failure the provider reports with a structured code.
///
/// `code` is kept as the raw JSON value the provider produced: providers are
/// free to report `0`, `""` or `null`, and those must still count as
/// structured failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcFailure {
    pub code: Value,
    pub message: String,
    pub name: Option<String>,
    pub stack: Option<String>,
}

impl RpcFailure {
    pub fn new(code: impl Into<Value>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            name: None,
            stack: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Numeric code for the wire, or `default` when the raw code is falsy
    /// or has no numeric reading.
    pub fn coerced_code(&self, default: i64) -> i64 {
        coerce_code(&self.code).unwrap_or(default)
    }

    /// Debugging payload attached as `error.data`. Never protocol-significant.
    pub fn diagnostics(&self) -> Value {
        json!({
            "stack": self.stack,
            "name": self.name,
        })
    }
}

impl std::fmt::Display for RpcFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "provider error [{}]: {}", self.code, self.message)
    }
}

/// Numeric reading of a truthy code. `None` means "use the default".
fn coerce_code(code: &Value) -> Option<i64> {
    match code {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return (i != 0).then_some(i);
            }
            n.as_f64()
                .filter(|f| *f != 0.0 && f.is_finite())
                .map(|f| f.trunc() as i64)
        }
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => parse_numeric(s.trim()),
        Value::Bool(true) => Some(1),
        _ => None,
    }
}

fn parse_numeric(s: &str) -> Option<i64> {
    if s.is_empty() {
        return Some(0);
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        // from_str_radix tolerates a sign, a hex literal does not
        if !hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            return None;
        }
        return i64::from_str_radix(hex, 16).ok();
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

/// Failure of a call on the underlying provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Protocol-level failure with a structured code.
    #[error("{0}")]
    Rpc(RpcFailure),

    /// Anything without a structured code: lost connection, malformed
    /// transport response, and so on.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    pub fn rpc(code: impl Into<Value>, message: impl Into<String>) -> Self {
        Self::Rpc(RpcFailure::new(code, message))
    }

    pub fn transport(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(source.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<RpcFailure> for ProviderError {
    fn from(failure: RpcFailure) -> Self {
        Self::Rpc(failure)
    }
}
