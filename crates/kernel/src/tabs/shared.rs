//! Lock-guarded registry handle for hosts that register tabs while serving.

use std::sync::Arc;

use parking_lot::RwLock;

use super::error::TabError;
use super::registry::TabRegistry;
use super::tab::{Tab, TabDefinition};

/// Shared tab registry.
///
/// Wrapped in Arc internally so Clone is cheap. Writers take the write
/// lock; readers take the read lock and get owned copies back.
#[derive(Debug)]
pub struct SharedTabRegistry<C> {
    inner: Arc<RwLock<TabRegistry<C>>>,
}

impl<C> Clone for SharedTabRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> SharedTabRegistry<C> {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self::from_registry(TabRegistry::new())
    }

    /// Share an already populated registry, e.g. one built at startup.
    pub fn from_registry(registry: TabRegistry<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Register a sub-tab. See [`TabRegistry::register`].
    pub fn register(&self, def: TabDefinition<C>) -> Result<(), TabError> {
        self.inner.write().register(def)
    }

    /// Remove a whole group of tabs.
    #[deprecated(note = "groups are expected to live for the lifetime of the registry")]
    pub fn unregister_group(&self, group: &str) {
        #[allow(deprecated)]
        self.inner.write().unregister_group(group);
    }

    /// Replace a tab's contents. Returns `false` if the tab does not exist.
    pub fn set_contents(&self, group: &str, name: &str, contents: C) -> bool {
        match self.inner.write().contents_mut(group, name) {
            Some(mut handle) => {
                handle.set(contents);
                true
            }
            None => false,
        }
    }

    /// Run `f` with read access to the registry.
    ///
    /// Keep `f` short; registration is blocked while it runs.
    pub fn read<R>(&self, f: impl FnOnce(&TabRegistry<C>) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Group that holds a tab called `name`, if any.
    pub fn get_group_name_for_tab(&self, name: &str) -> Option<String> {
        self.inner
            .read()
            .get_group_name_for_tab(name)
            .map(str::to_string)
    }

    /// Number of tabs across all groups.
    pub fn tab_count(&self) -> usize {
        self.inner.read().tab_count()
    }
}

impl<C: Clone> SharedTabRegistry<C> {
    /// Copy of a single tab.
    pub fn get_tab(&self, group: &str, name: &str) -> Option<Tab<C>> {
        self.inner.read().get_tab(group, name).cloned()
    }

    /// Copy of a group's tabs in placement order.
    pub fn get_tab_group(&self, group: &str) -> Option<Vec<Tab<C>>> {
        self.inner.read().get_tab_group(group).map(<[Tab<C>]>::to_vec)
    }
}

impl<C> Default for SharedTabRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
