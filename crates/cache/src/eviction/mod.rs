//! Byte-bounded LRU eviction for cache shards
//!
//! A [`Shard`] holds entries in recency order and evicts from the least
//! recently used end whenever the summed entry size exceeds its budget.

mod shard;
mod traits;

// Re-export public API
pub use shard::{OnEvicted, Shard};
pub use traits::SizedValue;
