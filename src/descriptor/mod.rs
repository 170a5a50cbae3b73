//! Datanode Descriptor Module
//!
//! The externally-owned collaborator types the registry stores references
//! to: the `host:port` identity of a storage-node process and the usage
//! stats its heartbeats keep current.

pub mod datanode;

pub use datanode::*;
