//! Datanode descriptor types
//!
//! A descriptor represents one storage-node process and is owned by the
//! cluster manager for the lifetime of that process. The registry stores
//! `Arc` references to descriptors and reads only the `host:port`
//! identity; usage stats are updated concurrently by the heartbeat path
//! through atomics and never require a lock.

use crate::error::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// =============================================================================
// Datanode ID
// =============================================================================

/// Transfer address of a datanode process: `host:port`.
///
/// Value equality compares `(host, port)` and backs exact-address lookup.
/// Registry membership is not value-based: two descriptors carrying the
/// same address are independent registrations (see
/// [`HostNodeRegistry`](crate::registry::HostNodeRegistry)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatanodeId {
    host: String,
    port: u16,
}

impl DatanodeId {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host part of the address (IP or hostname)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Service port the node process listens on
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl std::fmt::Display for DatanodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for DatanodeId {
    type Err = Error;

    /// Parse a `host:port` transfer address.
    ///
    /// The host part is taken verbatim; the registry treats it as an
    /// opaque key and performs no address validation.
    fn from_str(s: &str) -> Result<Self> {
        let (host, port) = s.rsplit_once(':').ok_or_else(|| Error::MissingPort {
            addr: s.to_string(),
        })?;
        let port = port.parse().map_err(|source| Error::InvalidPort {
            addr: s.to_string(),
            source,
        })?;
        Ok(Self::new(host, port))
    }
}

// =============================================================================
// Node Usage Stats
// =============================================================================

/// Usage counters reported by a node's heartbeats.
///
/// Aligned to a cache line to prevent false sharing between nodes that
/// report concurrently. The cluster manager updates these while readers
/// hold the registry's shared lock, so every field is atomic.
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct NodeStats {
    /// Raw capacity in bytes
    capacity_bytes: AtomicU64,
    /// Bytes used by the storage service
    used_bytes: AtomicU64,
    /// Bytes still available for placement
    remaining_bytes: AtomicU64,
    /// Last report timestamp (Unix millis)
    last_update_ms: AtomicU64,
}

impl NodeStats {
    /// Record a heartbeat report
    pub fn update(&self, capacity_bytes: u64, used_bytes: u64, remaining_bytes: u64) {
        self.capacity_bytes.store(capacity_bytes, Ordering::Relaxed);
        self.used_bytes.store(used_bytes, Ordering::Relaxed);
        self.remaining_bytes.store(remaining_bytes, Ordering::Relaxed);
        self.last_update_ms
            .store(Utc::now().timestamp_millis() as u64, Ordering::Release);
    }

    /// Get raw capacity in bytes
    #[inline]
    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes.load(Ordering::Relaxed)
    }

    /// Get used bytes
    #[inline]
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes.load(Ordering::Relaxed)
    }

    /// Get remaining bytes
    #[inline]
    pub fn remaining_bytes(&self) -> u64 {
        self.remaining_bytes.load(Ordering::Relaxed)
    }

    /// Check if the node has not reported in the last N seconds
    pub fn is_stale(&self, max_age_secs: u64) -> bool {
        let last_update = self.last_update_ms.load(Ordering::Acquire);
        if last_update == 0 {
            return true;
        }
        let now_ms = Utc::now().timestamp_millis() as u64;
        let age_ms = now_ms.saturating_sub(last_update);
        age_ms > (max_age_secs * 1000)
    }
}

// =============================================================================
// Datanode Descriptor
// =============================================================================

/// One storage-node process known to the cluster manager.
///
/// Descriptors are shared as `Arc`; the `Arc` identity, not the address
/// value, is what the registry tracks. A re-joining node therefore gets
/// a fresh registration even while the old descriptor for the same
/// `host:port` is still being torn down.
#[derive(Debug)]
pub struct DatanodeDescriptor {
    /// Transfer address identity, fixed at construction
    id: DatanodeId,
    /// Opaque topology path, e.g. `/d1/r1`
    network_location: String,
    /// Heartbeat-updated usage counters
    stats: NodeStats,
}

impl DatanodeDescriptor {
    /// Create a descriptor, shared for registration and placement paths
    pub fn new(id: DatanodeId, network_location: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id,
            network_location: network_location.into(),
            stats: NodeStats::default(),
        })
    }

    /// Transfer address identity
    pub fn id(&self) -> &DatanodeId {
        &self.id
    }

    /// Topology path this node was registered under
    pub fn network_location(&self) -> &str {
        &self.network_location
    }

    /// Heartbeat-updated usage counters
    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }
}

impl std::fmt::Display for DatanodeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_id_parse_round_trip() {
        let id: DatanodeId = "3.3.3.3:5020".parse().unwrap();
        assert_eq!(id.host(), "3.3.3.3");
        assert_eq!(id.port(), 5020);
        assert_eq!(id.to_string(), "3.3.3.3:5020");
    }

    #[test]
    fn test_id_parse_missing_port() {
        let err = "1.1.1.1".parse::<DatanodeId>().unwrap_err();
        assert_matches!(err, Error::MissingPort { addr } if addr == "1.1.1.1");
    }

    #[test]
    fn test_id_parse_bad_port() {
        let err = "1.1.1.1:http".parse::<DatanodeId>().unwrap_err();
        assert_matches!(err, Error::InvalidPort { .. });
    }

    #[test]
    fn test_id_value_equality() {
        let a = DatanodeId::new("2.2.2.2", 5020);
        let b: DatanodeId = "2.2.2.2:5020".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, DatanodeId::new("2.2.2.2", 5030));
    }

    #[test]
    fn test_stats_cache_line_alignment() {
        assert_eq!(std::mem::align_of::<NodeStats>(), 64);
        assert!(std::mem::size_of::<NodeStats>() <= 64);
    }

    #[test]
    fn test_stats_update_and_read() {
        let stats = NodeStats::default();
        assert!(stats.is_stale(60));

        stats.update(2_000_000_000_000, 500_000_000_000, 1_500_000_000_000);

        assert_eq!(stats.capacity_bytes(), 2_000_000_000_000);
        assert_eq!(stats.used_bytes(), 500_000_000_000);
        assert_eq!(stats.remaining_bytes(), 1_500_000_000_000);
        assert!(!stats.is_stale(60));
    }

    #[test]
    fn test_descriptor_accessors() {
        let node = DatanodeDescriptor::new(DatanodeId::new("1.1.1.1", 5020), "/d1/r1");
        assert_eq!(node.id().host(), "1.1.1.1");
        assert_eq!(node.network_location(), "/d1/r1");
        assert_eq!(node.to_string(), "1.1.1.1:5020");
    }
}
