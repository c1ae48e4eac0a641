//! Provider adapter: translates legacy JSON-RPC calls into provider calls.

use std::sync::Arc;

use bridge_protocol::{
    DATA_EVENT, DataEvent, ErrorInfo, JsonRpcRequest, JsonRpcResponse, Payload,
    ProviderError, ProviderMessage, Reply,
};
use bridge_provider::Provider;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::AdapterConfig;
use crate::error::BridgeError;
use crate::forwarding::{DiagnosticSink, Forwarder};

/// Legacy-facing handle over a modern provider.
///
/// Cloning is cheap and every clone shares the same provider, forwarding
/// table and event channels.
pub struct ProviderAdapter<P: Provider> {
    inner: Arc<Inner<P>>,
}

struct Inner<P: Provider> {
    provider: Arc<P>,
    config: AdapterConfig,
    forwarder: Arc<Forwarder>,
}

impl<P: Provider> Clone for ProviderAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: Provider> ProviderAdapter<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_config(provider, AdapterConfig::default())
    }

    /// Wrap `provider` and start forwarding its messages.
    ///
    /// The message listener registered here lives as long as the provider.
    pub fn with_config(provider: Arc<P>, config: AdapterConfig) -> Self {
        let forwarder = Arc::new(Forwarder::new(
            config.forwarding.clone(),
            config.event_capacity,
        ));

        let listener = forwarder.clone();
        provider.on_message(Arc::new(move |message: &ProviderMessage| {
            listener.handle(message);
        }));

        info!("Provider adapter ready ({:?})", forwarder.table());

        Self {
            inner: Arc::new(Inner {
                provider,
                config,
                forwarder,
            }),
        }
    }

    /// Legacy entry point: run `payload` and hand the outcome to `callback`.
    ///
    /// The callback runs exactly once, on a task spawned on the current
    /// tokio runtime. A single request yields [`Reply::Single`], a batch
    /// yields [`Reply::Batch`]; transport failures arrive as `Err`. Outside a
    /// runtime the callback is invoked immediately with
    /// [`BridgeError::NoRuntime`] and no task is returned.
    pub fn send<F>(&self, payload: Payload, callback: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<Reply, BridgeError>) + Send + 'static,
    {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("send called outside a tokio runtime: {e}");
                callback(Err(e.into()));
                return None;
            }
        };

        let adapter = self.clone();
        Some(handle.spawn(async move {
            let outcome = adapter.dispatch(payload).await;
            callback(outcome);
        }))
    }

    /// Run a payload to completion.
    pub async fn dispatch(&self, payload: Payload) -> Result<Reply, BridgeError> {
        match payload {
            Payload::Single(request) => self.send_request(&request).await.map(Reply::Single),
            Payload::Batch(requests) => self.send_batch(&requests).await.map(Reply::Batch),
        }
    }

    /// Forward one request. Structured failures come back as an error
    /// response; anything else is a [`BridgeError`].
    pub async fn send_request(
        &self,
        request: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, BridgeError> {
        debug!("-> {} (id {})", request.method, request.id);

        match self
            .inner
            .provider
            .send(&request.method, request.params.clone())
            .await
        {
            Ok(result) => Ok(JsonRpcResponse::success(request.id, result)),
            Err(ProviderError::Rpc(failure)) => {
                let config = &self.inner.config;
                let mut error = ErrorInfo::new(
                    failure.coerced_code(config.default_error_code),
                    failure.message.clone(),
                );
                if config.include_error_diagnostics {
                    error = error.with_data(failure.diagnostics());
                }
                debug!("<- {} (id {}) failed: {error}", request.method, request.id);
                Ok(JsonRpcResponse::error(request.id, error))
            }
            Err(ProviderError::Transport(source)) => {
                warn!("Transport failure on {} (id {}): {source}", request.method, request.id);
                Err(BridgeError::Transport(source))
            }
        }
    }

    /// Forward requests one at a time, in order, stopping after the first
    /// error response. That response is the last element returned.
    pub async fn send_batch(
        &self,
        requests: &[JsonRpcRequest],
    ) -> Result<Vec<JsonRpcResponse>, BridgeError> {
        let mut responses = Vec::with_capacity(requests.len());

        for request in requests {
            let response = self.send_request(request).await?;
            let failed = response.is_error();
            responses.push(response);

            if failed {
                if responses.len() < requests.len() {
                    warn!(
                        "Batch stopped at request {} of {} (id {})",
                        responses.len(),
                        requests.len(),
                        request.id,
                    );
                }
                break;
            }
        }

        Ok(responses)
    }

    /// Connectivity is the provider's concern; the adapter always reports
    /// itself connected.
    pub fn is_connected(&self) -> bool {
        true
    }

    /// Listen to the `data` event.
    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.inner.forwarder.subscribe_data()
    }

    /// Listen to any event the forwarding table emits.
    pub fn subscribe_event(&self, event: &str) -> Option<broadcast::Receiver<DataEvent>> {
        self.inner.forwarder.subscribe(event)
    }

    /// Number of live `data` receivers.
    pub fn listener_count(&self) -> usize {
        self.inner.forwarder.receiver_count(DATA_EVENT)
    }

    /// Redirect the "unknown message" diagnostics.
    pub fn set_diagnostic_sink(&self, sink: DiagnosticSink) {
        self.inner.forwarder.set_diagnostic_sink(sink);
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.inner.provider
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.inner.config
    }
}
