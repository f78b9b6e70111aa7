//! Named cache namespaces
//!
//! A [`Group`] answers `get(key)` from its local cache, from the peer that
//! owns the key, or by running the caller-supplied [`Getter`], in that order.
//! Concurrent misses for one key are coalesced into a single load.

mod builder;
mod stats;

pub use builder::GroupBuilder;
pub use stats::GroupStats;

use crate::byte_view::ByteView;
use crate::cache::LocalCache;
use crate::peers::{PeerGetter, PeerPicker};
use crate::protocol::Request;
use crate::singleflight::SingleFlight;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use peercache_core::{Error, Result};
use stats::Stats;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Loads the value for a key when no cache or peer has it
#[async_trait]
pub trait Getter: Send + Sync {
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Adapts a plain function into a [`Getter`]
pub struct GetterFn<F>(pub F);

#[async_trait]
impl<F> Getter for GetterFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (self.0)(key)
    }
}

/// A cache namespace with its own loader, local cache and peer routing
pub struct Group {
    name: String,
    getter: Arc<dyn Getter>,
    main_cache: LocalCache,
    /// Set at most once, during setup
    peers: OnceCell<Arc<dyn PeerPicker>>,
    loader: SingleFlight<ByteView>,
    stats: Stats,
}

impl Group {
    pub(crate) fn new(name: String, cache_bytes: u64, getter: Arc<dyn Getter>) -> Self {
        Self {
            name,
            getter,
            main_cache: LocalCache::new(cache_bytes),
            peers: OnceCell::new(),
            loader: SingleFlight::new(),
            stats: Stats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value for `key`, loading it on a miss
    pub async fn get(&self, key: &str) -> Result<ByteView> {
        Stats::incr(&self.stats.gets);
        if key.is_empty() {
            return Err(Error::invalid_key(key, "key is required"));
        }

        if let Some(value) = self.main_cache.get(key) {
            Stats::incr(&self.stats.cache_hits);
            debug!(group = %self.name, key, "cache hit");
            return Ok(value);
        }

        self.load(key).await
    }

    /// Attach the peer router. A group's routing is fixed once set.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> Result<()> {
        self.peers
            .set(peers)
            .map_err(|_| Error::PeerRouterAlreadyRegistered {
                group: self.name.clone(),
            })
    }

    /// Snapshot of this group's counters
    pub fn stats(&self) -> GroupStats {
        GroupStats {
            cache_bytes: self.main_cache.bytes(),
            cache_items: self.main_cache.items() as u64,
            cache_evictions: self.main_cache.evictions(),
            ..self.stats.snapshot()
        }
    }

    /// The group's local cache
    pub fn cache(&self) -> &LocalCache {
        &self.main_cache
    }

    async fn load(&self, key: &str) -> Result<ByteView> {
        Stats::incr(&self.stats.loads);
        self.loader
            .work(key, || async {
                // A previous call may have filled the cache while this one
                // was waiting to be scheduled.
                if let Some(value) = self.main_cache.get(key) {
                    Stats::incr(&self.stats.cache_hits);
                    return Ok(value);
                }
                Stats::incr(&self.stats.loads_deduped);

                if let Some(peer) = self.peers.get().and_then(|peers| peers.pick_peer(key)) {
                    match self.get_from_peer(peer.as_ref(), key).await {
                        Ok(value) => {
                            Stats::incr(&self.stats.peer_loads);
                            return Ok(value);
                        }
                        Err(e) => {
                            Stats::incr(&self.stats.peer_errors);
                            warn!(group = %self.name, key, error = %e, "failed to get from peer, loading locally");
                        }
                    }
                }

                self.get_locally(key).await
            })
            .await
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = match self.getter.get(key).await {
            Ok(bytes) => bytes,
            Err(e) => {
                Stats::incr(&self.stats.local_load_errs);
                return Err(e);
            }
        };
        Stats::incr(&self.stats.local_loads);

        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    async fn get_from_peer(&self, peer: &dyn PeerGetter, key: &str) -> Result<ByteView> {
        let request = Request::new(self.name.as_str(), key);
        let response = peer.get(&request).await?;
        debug!(group = %self.name, key, bytes = response.value.len(), "loaded from peer");
        Ok(ByteView::from(response.value))
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cache", &self.main_cache)
            .field("has_peers", &self.peers.get().is_some())
            .finish()
    }
}
