//! Name-indexed group registry
//!
//! Groups are registered once at setup and looked up by name afterwards,
//! mostly by the HTTP server answering peer requests.

use crate::group::{Getter, Group};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL: Lazy<GroupRegistry> = Lazy::new(GroupRegistry::new);

/// Thread-safe map from group name to group. Clones share the same map.
#[derive(Clone, Default)]
pub struct GroupRegistry {
    groups: Arc<RwLock<HashMap<String, Arc<Group>>>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static GroupRegistry {
        &GLOBAL
    }

    /// Register `group` under its name, returning any group it replaced
    pub fn insert(&self, group: Arc<Group>) -> Option<Arc<Group>> {
        let name = group.name().to_string();
        let previous = self.groups.write().insert(name.clone(), group);
        if previous.is_some() {
            tracing::warn!(group = %name, "replacing existing group with the same name");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Names of all registered groups, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

impl std::fmt::Debug for GroupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupRegistry")
            .field("groups", &self.names())
            .finish()
    }
}

/// Create a group and register it in the process-wide registry
pub fn new_group(name: impl Into<String>, cache_bytes: u64, getter: Arc<dyn Getter>) -> Arc<Group> {
    let group = Arc::new(Group::new(name.into(), cache_bytes, getter));
    GroupRegistry::global().insert(Arc::clone(&group));
    group
}

/// Look up a group in the process-wide registry
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    GroupRegistry::global().get(name)
}
