//! Adapter configuration.

use bridge_protocol::DEFAULT_ERROR_CODE;

use crate::forwarding::ForwardingTable;

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Attach `{stack, name}` to translated errors as `error.data`
    pub include_error_diagnostics: bool,
    /// Code reported when a provider failure has a falsy code
    pub default_error_code: i64,
    /// Capacity of each event broadcast channel (clamped to at least 1)
    pub event_capacity: usize,
    /// Which provider messages are republished, and under which event
    pub forwarding: ForwardingTable,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            include_error_diagnostics: true,
            default_error_code: DEFAULT_ERROR_CODE,
            event_capacity: 1024,
            forwarding: ForwardingTable::default(),
        }
    }
}

impl AdapterConfig {
    pub fn without_error_diagnostics(mut self) -> Self {
        self.include_error_diagnostics = false;
        self
    }

    pub fn with_forwarding(mut self, forwarding: ForwardingTable) -> Self {
        self.forwarding = forwarding;
        self
    }
}
