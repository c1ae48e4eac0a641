//! Message listener registry.
//!
//! Providers embed a [`MessageListeners`] to keep track of who wants their
//! `message` events and to fan each message out to all of them.

use std::sync::Arc;

use bridge_protocol::ProviderMessage;
use parking_lot::RwLock;
use tracing::trace;

/// Callback invoked for every message a provider emits.
pub type MessageListener = Arc<dyn Fn(&ProviderMessage) + Send + Sync>;

#[derive(Default)]
pub struct MessageListeners {
    listeners: RwLock<Vec<MessageListener>>,
}

impl MessageListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: MessageListener) {
        self.listeners.write().push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Deliver `message` to every listener, in registration order.
    ///
    /// The lock is released before any listener runs, so a listener may
    /// register further listeners without deadlocking. Those only see
    /// subsequent messages.
    pub fn emit(&self, message: &ProviderMessage) {
        let snapshot: Vec<MessageListener> = self.listeners.read().clone();
        trace!("Dispatching {} message to {} listeners", message.kind, snapshot.len());
        for listener in &snapshot {
            listener(message);
        }
    }
}

impl std::fmt::Debug for MessageListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageListeners")
            .field("count", &self.len())
            .finish()
    }
}
