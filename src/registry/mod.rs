//! Host Registry Module
//!
//! The host-to-node mapping consulted on every placement and topology
//! decision, plus the lifecycle events it fans out to external consumers.

pub mod events;
pub mod host_registry;

pub use events::*;
pub use host_registry::*;
