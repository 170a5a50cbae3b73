//! Registry Events
//!
//! Events emitted by the host registry for external consumers to react
//! to registration churn.

use serde::{Deserialize, Serialize};

/// Events emitted by the host registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A node was bound to its host
    NodeAdded { host: String, port: u16 },

    /// A node's registration was removed
    NodeRemoved { host: String, port: u16 },

    /// A host lost its last node and left the mapping
    HostRetired { host: String },
}

impl RegistryEvent {
    /// Get the host this event concerns
    pub fn host(&self) -> &str {
        match self {
            RegistryEvent::NodeAdded { host, .. } => host,
            RegistryEvent::NodeRemoved { host, .. } => host,
            RegistryEvent::HostRetired { host } => host,
        }
    }

    /// Get the service port if this is a node-level event
    pub fn port(&self) -> Option<u16> {
        match self {
            RegistryEvent::NodeAdded { port, .. } => Some(*port),
            RegistryEvent::NodeRemoved { port, .. } => Some(*port),
            RegistryEvent::HostRetired { .. } => None,
        }
    }

    /// Check if this is a node-level event
    pub fn is_node_event(&self) -> bool {
        matches!(
            self,
            RegistryEvent::NodeAdded { .. } | RegistryEvent::NodeRemoved { .. }
        )
    }
}
