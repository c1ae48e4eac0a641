//! The provider trait the adapter wraps.

use bridge_protocol::ProviderError;
use serde_json::Value;

use crate::listeners::MessageListener;

/// Trait implemented by modern, promise-style providers.
///
/// Request ids, connection lifecycle, retries and timeouts all live behind
/// this trait; callers only pass a method name and its positional params.
pub trait Provider: Send + Sync + 'static {
    /// Issue a call and resolve to its result.
    ///
    /// Protocol-level failures must come back as [`ProviderError::Rpc`] so
    /// they can be reported to legacy callers as error responses. Anything
    /// else is a [`ProviderError::Transport`].
    fn send(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> impl std::future::Future<Output = Result<Value, ProviderError>> + Send;

    /// Register a listener for the provider's `message` events.
    ///
    /// Listeners stay registered for the provider's lifetime.
    fn on_message(&self, listener: MessageListener);
}
