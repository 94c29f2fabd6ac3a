//! Tab registry - collects sub-tabs contributed by feature modules.
//!
//! Tabs are grouped by menu section and each group is kept sorted by
//! placement. Ties keep registration order.

use std::collections::HashMap;
use std::ops::Deref;

use tracing::{debug, info};

use super::error::TabError;
use super::tab::{Placed, Tab, TabDefinition, is_valid_tab_name};

/// Registry of sub-tabs, keyed by group.
///
/// Generic over the contents handle `C`, which the registry stores but
/// never inspects.
#[derive(Debug, Clone)]
pub struct TabRegistry<C> {
    /// Group name -> tabs in ascending placement order.
    groups: HashMap<String, Vec<Tab<C>>>,
}

impl<C> TabRegistry<C> {
    /// Create an empty tab registry.
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Register a sub-tab.
    ///
    /// Fails without touching the registry if the name is not made of
    /// lowercase letters, digits and underscores, or if the group already
    /// has a tab with that name.
    pub fn register(&mut self, def: TabDefinition<C>) -> Result<(), TabError> {
        if !is_valid_tab_name(&def.name) {
            return Err(TabError::invalid_name(def.group, def.name));
        }

        if self.get_tab(&def.group, &def.name).is_some() {
            return Err(TabError::duplicate(def.group, def.name));
        }

        let tab = Tab::from_definition(def);
        let tabs = self.groups.entry(tab.group().to_string()).or_default();

        // After every tab with an equal placement
        let index = tabs.partition_point(|t| t.placement() <= tab.placement());

        debug!(
            group = %tab.group(),
            tab = %tab.name(),
            placement = tab.placement(),
            position = index,
            "registered sub-tab"
        );

        tabs.insert(index, tab);
        Ok(())
    }

    /// Remove a whole group of tabs. Does nothing if the group is unknown.
    #[deprecated(note = "groups are expected to live for the lifetime of the registry")]
    pub fn unregister_group(&mut self, group: &str) {
        if let Some(tabs) = self.groups.remove(group) {
            info!(group = %group, tabs = tabs.len(), "unregistered tab group");
        }
    }

    /// Look up a tab by group and name.
    pub fn get_tab(&self, group: &str, name: &str) -> Option<&Tab<C>> {
        self.groups.get(group)?.iter().find(|t| t.name() == name)
    }

    /// All tabs of a group in placement order, or `None` if the group was
    /// never registered.
    pub fn get_tab_group(&self, group: &str) -> Option<&[Tab<C>]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Find a group that holds a tab called `name`.
    ///
    /// Names are only unique per group. When several groups use the same
    /// name, which one is returned depends on map iteration order.
    pub fn get_group_name_for_tab(&self, name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, tabs)| tabs.iter().any(|t| t.name() == name))
            .map(|(group, _)| group.as_str())
    }

    /// Handle for replacing one tab's contents.
    pub fn contents_mut(&mut self, group: &str, name: &str) -> Option<TabContentsMut<'_, C>> {
        self.groups
            .get_mut(group)?
            .iter_mut()
            .find(|t| t.name() == name)
            .map(|tab| TabContentsMut { tab })
    }

    /// Contents handles for every tab of a group, in placement order.
    pub fn group_contents_mut(
        &mut self,
        group: &str,
    ) -> Option<impl Iterator<Item = TabContentsMut<'_, C>>> {
        self.groups
            .get_mut(group)
            .map(|tabs| tabs.iter_mut().map(|tab| TabContentsMut { tab }))
    }

    /// Names of all registered groups.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group has been registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of tabs across all groups.
    pub fn tab_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl<C> Default for TabRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable access to a registered tab's contents and nothing else.
///
/// Dereferences to the [`Tab`] for reading the other fields.
#[derive(Debug)]
pub struct TabContentsMut<'a, C> {
    tab: &'a mut Tab<C>,
}

impl<C> TabContentsMut<'_, C> {
    /// Current contents.
    pub fn get(&self) -> Option<&C> {
        self.tab.contents()
    }

    /// Mutate the contents in place.
    pub fn get_mut(&mut self) -> Option<&mut C> {
        self.tab.contents_mut()
    }

    /// Replace the contents, returning the previous value.
    pub fn set(&mut self, contents: C) -> Option<C> {
        self.tab.replace_contents(Some(contents))
    }

    /// Remove the contents, returning the previous value.
    pub fn clear(&mut self) -> Option<C> {
        self.tab.replace_contents(None)
    }
}

impl<C> Deref for TabContentsMut<'_, C> {
    type Target = Tab<C>;

    fn deref(&self) -> &Tab<C> {
        self.tab
    }
}
