//! LRU (Least Recently Used) shard bounded by total entry size

use super::traits::SizedValue;
use lru::LruCache;
use std::fmt;

/// Callback invoked with every entry that leaves the shard
pub type OnEvicted<V> = Box<dyn FnMut(&str, &V) + Send>;

/// A byte-bounded, recency-ordered key/value store.
///
/// Each entry is charged `key.len() + value.size()` bytes. There is no
/// limit on the number of entries, only on their cumulative size. Not
/// thread safe; see [`LocalCache`](crate::LocalCache) for the guarded form.
pub struct Shard<V> {
    /// Maximum bytes allowed
    max_bytes: u64,
    /// Bytes currently charged
    used_bytes: u64,
    /// Entries, most recently used first
    entries: LruCache<String, V>,
    on_evicted: Option<OnEvicted<V>>,
    /// Entries dropped to get back under budget
    evictions: u64,
}

impl<V: SizedValue> Shard<V> {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            entries: LruCache::unbounded(),
            on_evicted: None,
            evictions: 0,
        }
    }

    pub fn with_on_evicted(max_bytes: u64, on_evicted: OnEvicted<V>) -> Self {
        Self {
            on_evicted: Some(on_evicted),
            ..Self::new(max_bytes)
        }
    }

    /// Insert or replace `key`, marking it most recently used, then evict
    /// from the cold end until the shard fits its budget again.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let key_len = key.len() as u64;
        let size = value.size() as u64;

        match self.entries.put(key, value) {
            Some(old) => {
                self.used_bytes = self.used_bytes - old.size() as u64 + size;
            }
            None => {
                self.used_bytes += key_len + size;
            }
        }

        // An empty shard stops the loop even when a single entry was
        // larger than the whole budget.
        while self.used_bytes > self.max_bytes && !self.entries.is_empty() {
            if self.remove_oldest().is_some() {
                self.evictions += 1;
            }
        }
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Look up `key` without touching its recency
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.entries.peek(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Remove `key` explicitly.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let value = self.entries.pop(key)?;
        self.release(key, &value);
        Some(value)
    }

    /// Remove the least recently used entry.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let (key, value) = self.entries.pop_lru()?;
        tracing::trace!(key = %key, size = value.size(), "evicting least recently used entry");
        self.release(&key, &value);
        Some((key, value))
    }

    fn release(&mut self, key: &str, value: &V) {
        self.used_bytes -= key.len() as u64 + value.size() as u64;
        if let Some(callback) = self.on_evicted.as_mut() {
            callback(key, value);
        }
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently charged against the budget
    pub fn bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Number of entries evicted because the budget was exceeded
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}

impl<V> fmt::Debug for Shard<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shard")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.entries.len())
            .field("evictions", &self.evictions)
            .finish()
    }
}
