//! Peer pool: ring-based key ownership plus one client per peer

use super::client::HttpGetter;
use super::server;
use crate::config::PeerCacheConfig;
use crate::consistent_hash::HashRing;
use crate::peers::{PeerGetter, PeerPicker};
use crate::registry::GroupRegistry;
use axum::Router;
use parking_lot::RwLock;
use peercache_core::{Error, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

struct PoolState {
    ring: HashRing,
    getters: HashMap<String, Arc<HttpGetter>>,
}

/// A node's view of the cluster.
///
/// Implements [`PeerPicker`] for groups and builds the [`Router`] that
/// answers other peers.
pub struct HttpPool {
    /// This node's own URL, e.g. `http://10.0.0.1:8008`
    self_url: String,
    base_path: String,
    replicas: usize,
    client: Client,
    state: RwLock<PoolState>,
}

impl HttpPool {
    pub fn new(self_url: impl Into<String>, config: &PeerCacheConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.peer_timeout)
            .build()
            .map_err(|e| Error::configuration(format!("building http client: {e}")))?;

        Ok(Self {
            self_url: self_url.into(),
            base_path: config.base_path.clone(),
            replicas: config.replicas,
            client,
            state: RwLock::new(PoolState {
                ring: HashRing::new(config.replicas),
                getters: HashMap::new(),
            }),
        })
    }

    pub fn self_url(&self) -> &str {
        &self.self_url
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Replace the peer set. The list should include this node's own URL.
    pub fn set_peers<I, S>(&self, peers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let peers: Vec<String> = peers.into_iter().map(|p| p.as_ref().to_string()).collect();

        let mut ring = HashRing::new(self.replicas);
        ring.add(&peers);

        let mut getters = HashMap::with_capacity(peers.len());
        for peer in &peers {
            let getter = HttpGetter::new(peer, &self.base_path, self.client.clone())?;
            getters.insert(peer.clone(), Arc::new(getter));
        }

        *self.state.write() = PoolState { ring, getters };
        info!(self_url = %self.self_url, peers = ?peers, "peer set updated");
        Ok(())
    }

    /// Current peer URLs, sorted
    pub fn peers(&self) -> Vec<String> {
        let mut peers: Vec<String> = self.state.read().getters.keys().cloned().collect();
        peers.sort();
        peers
    }

    /// Router serving `GET {base_path}{group}/{key}` from `registry`
    pub fn router(&self, registry: GroupRegistry) -> Router {
        server::router(&self.base_path, registry)
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let state = self.state.read();
        let peer = state.ring.get(key)?;
        if peer == self.self_url {
            return None;
        }

        debug!(key, peer, "picked remote peer");
        let getter = state.getters.get(peer)?;
        Some(Arc::clone(getter) as Arc<dyn PeerGetter>)
    }
}

impl fmt::Debug for HttpPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPool")
            .field("self_url", &self.self_url)
            .field("base_path", &self.base_path)
            .field("replicas", &self.replicas)
            .field("peers", &self.peers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELF: &str = "http://127.0.0.1:8001";
    const OTHER: &str = "http://127.0.0.1:8002";

    fn pool() -> HttpPool {
        HttpPool::new(SELF, &PeerCacheConfig::default()).unwrap()
    }

    #[test]
    fn test_no_peers_picks_nothing() {
        assert!(pool().pick_peer("Tom").is_none());
    }

    #[test]
    fn test_only_self_picks_nothing() {
        let pool = pool();
        pool.set_peers([SELF]).unwrap();
        for i in 0..100 {
            assert!(pool.pick_peer(&format!("key-{i}")).is_none());
        }
    }

    #[test]
    fn test_remote_owner_is_picked() {
        let pool = pool();
        pool.set_peers([SELF, OTHER]).unwrap();

        let mut ring = HashRing::new(PeerCacheConfig::default().replicas);
        ring.add([SELF, OTHER]);

        let mut remote = 0;
        for i in 0..200 {
            let key = format!("key-{i}");
            let picked = pool.pick_peer(&key).is_some();
            assert_eq!(picked, ring.get(&key) == Some(OTHER), "key {key}");
            remote += usize::from(picked);
        }
        assert!(remote > 0 && remote < 200);
    }

    #[test]
    fn test_set_peers_replaces_previous_set() {
        let pool = pool();
        pool.set_peers([SELF, OTHER]).unwrap();
        assert_eq!(pool.peers(), vec![SELF.to_string(), OTHER.to_string()]);

        pool.set_peers([SELF]).unwrap();
        assert_eq!(pool.peers(), vec![SELF.to_string()]);
        assert!(pool.pick_peer("anything").is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PeerCacheConfig {
            replicas: 0,
            ..PeerCacheConfig::default()
        };
        assert!(HttpPool::new(SELF, &config).is_err());
    }
}
