//! Fluent construction of groups

use super::{Getter, GetterFn, Group};
use crate::registry::GroupRegistry;
use peercache_core::{Error, Result, DEFAULT_CACHE_BYTES};
use std::sync::Arc;

/// Builder for [`Group`]
///
/// ```no_run
/// use peercache_cache::GroupBuilder;
///
/// let group = GroupBuilder::new("scores")
///     .cache_bytes(2 << 10)
///     .getter_fn(|key: &str| Ok(key.as_bytes().to_vec()))
///     .build()
///     .unwrap();
/// assert_eq!(group.name(), "scores");
/// ```
pub struct GroupBuilder {
    name: String,
    cache_bytes: u64,
    getter: Option<Arc<dyn Getter>>,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cache_bytes: DEFAULT_CACHE_BYTES,
            getter: None,
        }
    }

    /// Byte budget for the group's local cache. Zero disables caching.
    pub fn cache_bytes(mut self, cache_bytes: u64) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    pub fn getter(mut self, getter: Arc<dyn Getter>) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Use a plain function as the loader
    pub fn getter_fn<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        self.getter(Arc::new(GetterFn(f)))
    }

    /// Build the group and register it in the process-wide registry
    pub fn build(self) -> Result<Arc<Group>> {
        self.build_in(GroupRegistry::global())
    }

    /// Build the group and register it in `registry`
    pub fn build_in(self, registry: &GroupRegistry) -> Result<Arc<Group>> {
        let getter = self.getter.ok_or_else(|| {
            Error::configuration(format!("group '{}' has no getter", self.name))
        })?;

        let group = Arc::new(Group::new(self.name, self.cache_bytes, getter));
        registry.insert(Arc::clone(&group));
        Ok(group)
    }
}
