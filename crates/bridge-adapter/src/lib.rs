//! Bridge Adapter: exposes a modern provider through the legacy
//! callback-based JSON-RPC interface.
//!
//! The adapter forwards single and batched requests, folds structured
//! provider failures into JSON-RPC error responses, and republishes
//! subscription messages as generic `data` events.

pub mod adapter;
pub mod config;
pub mod error;
pub mod forwarding;

pub use adapter::ProviderAdapter;
pub use config::AdapterConfig;
pub use error::BridgeError;
pub use forwarding::{DiagnosticSink, ForwardOutcome, ForwardRule, Forwarder, ForwardingTable};
