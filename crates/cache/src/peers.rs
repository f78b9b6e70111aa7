//! Capabilities a group needs from the peer transport
//!
//! [`PeerPicker`] decides which peer owns a key; [`PeerGetter`] fetches a
//! value from one peer. The group only ever talks to peers through these
//! two traits, so any RPC mechanism can sit behind them.

use crate::protocol::{Request, Response};
use async_trait::async_trait;
use peercache_core::Result;
use std::sync::Arc;

/// Locates the peer that owns a key
pub trait PeerPicker: Send + Sync {
    /// Returns the owning peer, or `None` when the key should be loaded
    /// locally (no peers, or this node owns it).
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// Fetches a value from a remote peer
#[async_trait]
pub trait PeerGetter: Send + Sync {
    async fn get(&self, request: &Request) -> Result<Response>;
}
