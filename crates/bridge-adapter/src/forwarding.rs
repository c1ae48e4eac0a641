//! Notification forwarding: republishes selected provider messages as
//! events legacy listeners understand.
//!
//! A [`ForwardingTable`] maps a message type tag to the events it is
//! re-emitted under. The [`Forwarder`] owns one broadcast channel per event
//! and applies the table to each incoming message. Messages with no rule are
//! reported to the diagnostic sink and dropped.

use std::collections::HashMap;
use std::sync::Arc;

use bridge_protocol::{DATA_EVENT, DataEvent, ETH_SUBSCRIPTION, ProviderMessage};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

/// Receives one line per dropped message.
pub type DiagnosticSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Re-emit a matched message under `event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRule {
    pub event: String,
}

/// Message type tag → forwarding rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingTable {
    rules: HashMap<String, Vec<ForwardRule>>,
}

impl ForwardingTable {
    /// A table that forwards nothing.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add a rule re-emitting messages tagged `tag` under `event`.
    pub fn forward(mut self, tag: impl Into<String>, event: impl Into<String>) -> Self {
        let rule = ForwardRule { event: event.into() };
        let rules = self.rules.entry(tag.into()).or_default();
        if !rules.contains(&rule) {
            rules.push(rule);
        }
        self
    }

    pub fn rules_for(&self, tag: &str) -> &[ForwardRule] {
        self.rules.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every event name some rule emits.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.rules.values().flatten().map(|r| r.event.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ForwardingTable {
    fn default() -> Self {
        Self::empty().forward(ETH_SUBSCRIPTION, DATA_EVENT)
    }
}

/// What happened to one provider message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// No rule matched the message's type tag.
    Dropped,
    /// Re-emitted under `events`; `delivered` counts receivers reached.
    Forwarded { events: Vec<String>, delivered: usize },
}

pub struct Forwarder {
    table: ForwardingTable,
    data_tx: broadcast::Sender<DataEvent>,
    channels: HashMap<String, broadcast::Sender<DataEvent>>,
    diagnostics: RwLock<DiagnosticSink>,
}

impl Forwarder {
    pub fn new(table: ForwardingTable, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (data_tx, _) = broadcast::channel(capacity);
        let mut channels = HashMap::from([(DATA_EVENT.to_string(), data_tx.clone())]);
        for event in table.events() {
            channels
                .entry(event.to_string())
                .or_insert_with(|| broadcast::channel(capacity).0);
        }

        Self {
            table,
            data_tx,
            channels,
            diagnostics: RwLock::new(default_sink()),
        }
    }

    /// Swap the sink dropped messages are reported to.
    pub fn set_diagnostic_sink(&self, sink: DiagnosticSink) {
        *self.diagnostics.write() = sink;
    }

    pub fn subscribe_data(&self) -> broadcast::Receiver<DataEvent> {
        self.data_tx.subscribe()
    }

    pub fn subscribe(&self, event: &str) -> Option<broadcast::Receiver<DataEvent>> {
        self.channels.get(event).map(broadcast::Sender::subscribe)
    }

    pub fn receiver_count(&self, event: &str) -> usize {
        self.channels
            .get(event)
            .map(broadcast::Sender::receiver_count)
            .unwrap_or(0)
    }

    pub fn table(&self) -> &ForwardingTable {
        &self.table
    }

    /// Apply the table to one message. Never fails: with nobody listening
    /// the event is simply discarded.
    pub fn handle(&self, message: &ProviderMessage) -> ForwardOutcome {
        let rules = self.table.rules_for(&message.kind);
        if rules.is_empty() {
            let sink = self.diagnostics.read().clone();
            sink(&format!("Received unknown message: {}", message.kind));
            return ForwardOutcome::Dropped;
        }

        let payload = DataEvent::new(message.kind.clone(), message.data.clone());
        let mut delivered = 0;
        let mut events = Vec::with_capacity(rules.len());
        for rule in rules {
            if let Some(tx) = self.channels.get(&rule.event) {
                // No receivers is fine
                delivered += tx.send(payload.clone()).unwrap_or(0);
            }
            events.push(rule.event.clone());
        }

        debug!("Forwarded {} message to {:?} ({delivered} receivers)", message.kind, events);
        ForwardOutcome::Forwarded { events, delivered }
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("table", &self.table)
            .field("events", &self.channels.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn default_sink() -> DiagnosticSink {
    Arc::new(|line: &str| debug!("{line}"))
}
