//! Distributed read-through cache for peercache
//!
//! This crate provides the building blocks of a peer-to-peer cache cluster:
//! - Immutable, copy-on-read cached values (`ByteView`)
//! - Byte-bounded LRU shards behind a lazily built, mutex-guarded facade
//! - A consistent-hash ring mapping keys to peers
//! - Single-flight coalescing of concurrent loads for the same key
//! - Named cache groups wiring all of the above to a caller-supplied loader
//! - A default HTTP transport for fetching values from peers

pub mod byte_view;
pub mod cache;
pub mod config;
pub mod consistent_hash;
pub mod eviction;
pub mod group;
pub mod http;
pub mod peers;
pub mod protocol;
pub mod registry;
pub mod singleflight;

pub use byte_view::ByteView;
pub use cache::LocalCache;
pub use config::{ConfigSource, PeerCacheConfig, PeerCacheConfigBuilder, PeerCacheConfigLoader};
pub use consistent_hash::{HashFn, HashRing};
pub use eviction::{OnEvicted, Shard, SizedValue};
pub use group::{Getter, GetterFn, Group, GroupBuilder, GroupStats};
pub use http::{serve, HttpGetter, HttpPool};
pub use peers::{PeerGetter, PeerPicker};
pub use protocol::{Request, Response};
pub use registry::{get_group, new_group, GroupRegistry};
pub use singleflight::SingleFlight;

pub use peercache_core::{Error, Result};
