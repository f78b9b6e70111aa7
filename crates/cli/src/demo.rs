//! Demo data source: a small, slow "database" of scores

use async_trait::async_trait;
use peercache_cache::Getter;
use peercache_core::{Error, Result};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// In-memory table standing in for an expensive backing store
pub struct ScoresDb {
    rows: HashMap<String, String>,
    latency: Duration,
}

impl ScoresDb {
    pub fn new() -> Self {
        let rows = [("Tom", "630"), ("Jack", "589"), ("Sam", "567")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            rows,
            latency: Duration::from_millis(20),
        }
    }

    #[cfg(test)]
    pub(crate) fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Self::new()
        }
    }
}

impl Default for ScoresDb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Getter for ScoresDb {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        info!(key, "[SlowDB] search key");
        tokio::time::sleep(self.latency).await;
        self.rows
            .get(key)
            .map(|v| v.as_bytes().to_vec())
            .ok_or_else(|| Error::loader(key, format!("{key} not exist")))
    }
}
