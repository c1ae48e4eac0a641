//! Provider messages and the events republished from them.
//!
//! Providers push `{type, data}` messages at any time. Legacy callers never
//! see those directly: subscription messages are reshaped into
//! `{method, params}` and emitted under the generic `data` event.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag of subscription messages.
pub const ETH_SUBSCRIPTION: &str = "eth_subscription";

/// Event name legacy listeners subscribe to.
pub const DATA_EVENT: &str = "data";

/// Unsolicited message emitted by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
}

impl ProviderMessage {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    pub fn subscription(data: Value) -> Self {
        Self::new(ETH_SUBSCRIPTION, data)
    }

    pub fn is_subscription(&self) -> bool {
        self.kind == ETH_SUBSCRIPTION
    }
}

/// Payload of a `data` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEvent {
    pub method: String,
    pub params: Value,
}

impl DataEvent {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

impl From<ProviderMessage> for DataEvent {
    fn from(message: ProviderMessage) -> Self {
        Self {
            method: message.kind,
            params: message.data,
        }
    }
}
