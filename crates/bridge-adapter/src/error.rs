//! Errors surfaced to legacy callers.

/// A failure the adapter cannot express as a JSON-RPC response.
///
/// Structured provider failures never end up here; they become error
/// responses instead.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// `send` was called outside a tokio runtime, so nothing could run.
    #[error("no async runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
