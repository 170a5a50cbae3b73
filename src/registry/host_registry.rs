//! Host-to-Node Registry
//!
//! Maps each physical host address to the node processes currently bound
//! to it. The placement path consults this mapping on every replica
//! decision, so lookups take a shared lock and stay O(one host's nodes);
//! registration churn takes the exclusive lock.

use crate::descriptor::DatanodeDescriptor;
use crate::registry::events::RegistryEvent;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Capacity of the event fan-out channel
const EVENT_CHANNEL_CAPACITY: usize = 1024;

// =============================================================================
// Host Node Registry
// =============================================================================

/// Concurrent host-to-node registry.
///
/// One host may run several node processes on distinct service ports.
/// Entries are tracked by `Arc` identity rather than address value:
/// value-equal descriptors from separate allocations are independent
/// registrations, which keeps a re-join distinct from the registration
/// it replaces. A host key is present exactly while at least one node
/// is bound to it.
pub struct HostNodeRegistry {
    /// Host address -> nodes bound to it, in registration order
    map: RwLock<HashMap<String, Vec<Arc<DatanodeDescriptor>>>>,
    /// Tie-break source for multi-node hosts, outside the map lock so
    /// concurrent readers contend only on the draw
    rng: Mutex<StdRng>,
    /// Event broadcaster
    event_sender: broadcast::Sender<RegistryEvent>,
}

impl HostNodeRegistry {
    /// Create a registry with an entropy-seeded tie-break source
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a registry drawing tie-breaks from `rng`.
    ///
    /// A seeded generator makes multi-node host lookups reproducible,
    /// which test suites rely on.
    pub fn with_rng(rng: StdRng) -> Arc<Self> {
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            map: RwLock::new(HashMap::new()),
            rng: Mutex::new(rng),
            event_sender,
        })
    }

    /// Get an event receiver
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_sender.subscribe()
    }

    /// Bind `node` under the host carried by its own transfer address.
    ///
    /// Returns `false` without effect when `node` is absent or when this
    /// exact registration is already present; `true` once the node is
    /// appended to its host's sequence. The host key is created with the
    /// first node bound to it.
    pub fn add(&self, node: Option<&Arc<DatanodeDescriptor>>) -> bool {
        let Some(node) = node else { return false };
        let host = node.id().host();
        {
            let mut map = self.map.write();
            let nodes = map.entry(host.to_string()).or_default();
            if nodes.iter().any(|n| Arc::ptr_eq(n, node)) {
                return false;
            }
            nodes.push(Arc::clone(node));
        }
        debug!(host = %host, port = node.id().port(), "registered datanode");
        let _ = self.event_sender.send(RegistryEvent::NodeAdded {
            host: host.to_string(),
            port: node.id().port(),
        });
        true
    }

    /// Remove `node`'s registration.
    ///
    /// Returns `false` when `node` is absent, its host is unknown, or
    /// this identity is not among the host's entries; a second removal of
    /// the same node is an expected race outcome, not an error. On
    /// success the single matching entry is removed and the host key is
    /// dropped with its last node, so the mapping never carries an empty
    /// sequence.
    pub fn remove(&self, node: Option<&Arc<DatanodeDescriptor>>) -> bool {
        let Some(node) = node else { return false };
        let host = node.id().host();
        let host_retired = {
            let mut map = self.map.write();
            let Some(nodes) = map.get_mut(host) else {
                return false;
            };
            let Some(pos) = nodes.iter().position(|n| Arc::ptr_eq(n, node)) else {
                return false;
            };
            nodes.remove(pos);
            if nodes.is_empty() {
                map.remove(host);
                true
            } else {
                false
            }
        };
        debug!(host = %host, port = node.id().port(), "removed datanode");
        let _ = self.event_sender.send(RegistryEvent::NodeRemoved {
            host: host.to_string(),
            port: node.id().port(),
        });
        if host_retired {
            let _ = self.event_sender.send(RegistryEvent::HostRetired {
                host: host.to_string(),
            });
        }
        true
    }

    /// Check whether this exact registration is present.
    ///
    /// `false` for an absent reference, an unknown host, or a different
    /// node that merely shares the host.
    pub fn contains(&self, node: Option<&Arc<DatanodeDescriptor>>) -> bool {
        let Some(node) = node else { return false };
        self.map
            .read()
            .get(node.id().host())
            .is_some_and(|nodes| nodes.iter().any(|n| Arc::ptr_eq(n, node)))
    }

    /// Pick a node running on `host`.
    ///
    /// A host running a single node yields that node; a host running
    /// several yields one of them uniformly at random on each call, so
    /// placement load spreads across the co-hosted processes instead of
    /// pinning the earliest registration.
    pub fn get_datanode_by_host(&self, host: &str) -> Option<Arc<DatanodeDescriptor>> {
        let map = self.map.read();
        let nodes = map.get(host)?;
        let node = match nodes.len() {
            1 => &nodes[0],
            len => {
                let idx = self.rng.lock().gen_range(0..len);
                trace!(host = %host, idx, candidates = len, "tie-break draw");
                &nodes[idx]
            }
        };
        Some(Arc::clone(node))
    }

    /// Look up the node registered under an exact `(host, port)` address.
    ///
    /// Matches by address value; when duplicate registrations carry the
    /// same address, the earliest one wins.
    pub fn get_datanode_by_addr(&self, host: &str, port: u16) -> Option<Arc<DatanodeDescriptor>> {
        self.map
            .read()
            .get(host)?
            .iter()
            .find(|n| n.id().port() == port)
            .cloned()
    }

    /// Snapshot of every node bound to `host`, in registration order
    pub fn nodes_on_host(&self, host: &str) -> Vec<Arc<DatanodeDescriptor>> {
        self.map.read().get(host).cloned().unwrap_or_default()
    }

    /// Snapshot of the registered host addresses
    pub fn hosts(&self) -> Vec<String> {
        self.map.read().keys().cloned().collect()
    }

    /// Number of hosts currently running at least one node
    pub fn host_count(&self) -> usize {
        self.map.read().len()
    }

    /// Total registrations across all hosts
    pub fn node_count(&self) -> usize {
        self.map.read().values().map(Vec::len).sum()
    }

    /// Check if no node is registered
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl Default for HostNodeRegistry {
    fn default() -> Self {
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            map: RwLock::new(HashMap::new()),
            rng: Mutex::new(StdRng::from_entropy()),
            event_sender,
        }
    }
}

impl std::fmt::Debug for HostNodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.map.read();
        f.debug_struct("HostNodeRegistry")
            .field("hosts", &map.len())
            .field("nodes", &map.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
