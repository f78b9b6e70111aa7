//! Mutex-guarded facade over a lazily built LRU shard

use crate::byte_view::ByteView;
use crate::eviction::Shard;
use parking_lot::Mutex;

/// Thread-safe local cache owned by a single group.
///
/// The shard is only allocated by the first `add`; lookups against a
/// never-filled cache report a miss without allocating anything.
#[derive(Debug)]
pub struct LocalCache {
    cache_bytes: u64,
    shard: Mutex<Option<Shard<ByteView>>>,
}

impl LocalCache {
    pub fn new(cache_bytes: u64) -> Self {
        Self {
            cache_bytes,
            shard: Mutex::new(None),
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        let mut guard = self.shard.lock();
        let shard = guard.get_or_insert_with(|| Shard::new(self.cache_bytes));
        shard.add(key, value);
    }

    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.shard.lock();
        guard.as_mut()?.get(key).cloned()
    }

    /// Configured byte budget
    pub fn capacity(&self) -> u64 {
        self.cache_bytes
    }

    /// Bytes currently held
    pub fn bytes(&self) -> u64 {
        self.shard.lock().as_ref().map_or(0, Shard::bytes)
    }

    pub fn items(&self) -> usize {
        self.shard.lock().as_ref().map_or(0, Shard::len)
    }

    pub fn evictions(&self) -> u64 {
        self.shard.lock().as_ref().map_or(0, Shard::evictions)
    }

    fn is_allocated(&self) -> bool {
        self.shard.lock().is_some()
    }
}
