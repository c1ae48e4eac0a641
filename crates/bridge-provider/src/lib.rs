//! Provider capability
//!
//! The modern side of the bridge. A provider answers `(method, params)`
//! calls asynchronously and pushes unsolicited messages to whoever listens.
//! How it reaches the remote service (HTTP, IPC, in-process) is its own
//! business; the adapter only sees this trait.

pub mod listeners;
pub mod provider;

pub use listeners::{MessageListener, MessageListeners};
pub use provider::Provider;
