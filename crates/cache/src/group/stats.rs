//! Per-group counters

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for group operations using atomic counters
#[derive(Debug, Default)]
pub(crate) struct Stats {
    /// Any `get` request, including from peers
    pub gets: AtomicU64,
    /// Served from the local cache
    pub cache_hits: AtomicU64,
    /// Either remote load or remote cache hit (not an error)
    pub peer_loads: AtomicU64,
    pub peer_errors: AtomicU64,
    /// Gets that missed the cache
    pub loads: AtomicU64,
    /// Loads left after single-flight coalescing
    pub loads_deduped: AtomicU64,
    /// Values produced by the local getter
    pub local_loads: AtomicU64,
    /// Failed local getter calls
    pub local_load_errs: AtomicU64,
}

impl Stats {
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> GroupStats {
        GroupStats {
            gets: self.gets.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            peer_loads: self.peer_loads.load(Ordering::Relaxed),
            peer_errors: self.peer_errors.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            loads_deduped: self.loads_deduped.load(Ordering::Relaxed),
            local_loads: self.local_loads.load(Ordering::Relaxed),
            local_load_errs: self.local_load_errs.load(Ordering::Relaxed),
            cache_bytes: 0,
            cache_items: 0,
            cache_evictions: 0,
        }
    }
}

/// Snapshot of group statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub gets: u64,
    pub cache_hits: u64,
    pub peer_loads: u64,
    pub peer_errors: u64,
    pub loads: u64,
    pub loads_deduped: u64,
    pub local_loads: u64,
    pub local_load_errs: u64,
    pub cache_bytes: u64,
    pub cache_items: u64,
    pub cache_evictions: u64,
}
