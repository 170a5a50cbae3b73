//! Cluster Host Registry
//!
//! Concurrent host-to-node registry consulted by a cluster manager's
//! placement path. A physical host may run zero, one, or several
//! storage-node processes on distinct service ports; the registry tracks
//! which processes run where, answers membership and host lookups under
//! heavy read concurrency, and picks among co-hosted nodes with a
//! uniform tie-break so placement load spreads across them.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      Cluster Manager                      │
//! │  ┌──────────────────┐          ┌───────────────────────┐  │
//! │  │   Registration   │          │  Placement / Topology │  │
//! │  │  (join / leave)  │          │  (replica decisions)  │  │
//! │  └────────┬─────────┘          └──────────┬────────────┘  │
//! │           │ add / remove                  │ contains /    │
//! │           │                               │ get_by_host   │
//! │           └────────────┬──────────────────┘               │
//! │               ┌────────┴─────────┐                        │
//! │               │ HostNodeRegistry │──▶ RegistryEvent       │
//! │               │   (RwLock map)   │     (broadcast)        │
//! │               └──────────────────┘                        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: the host-to-node mapping and its lifecycle events
//! - [`descriptor`]: datanode identity and heartbeat-updated usage stats
//! - [`error`]: error types and handling

pub mod descriptor;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use descriptor::{DatanodeDescriptor, DatanodeId, NodeStats};
pub use error::{Error, Result};
pub use registry::{HostNodeRegistry, RegistryEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
