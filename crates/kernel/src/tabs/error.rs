//! Tab registration error types.
//!
//! Lookups never fail; a missing group or tab is reported as `None`.
//! Only registration can be rejected.

use thiserror::Error;

/// Errors returned by [`TabRegistry::register`](super::TabRegistry::register).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabError {
    /// The tab name contains something other than lowercase letters,
    /// digits and underscores.
    #[error(
        "tab '{name}' in group '{group}': sub-tab names must consist only of lowercase letters, numbers, and underscore"
    )]
    InvalidName { group: String, name: String },

    /// A tab with this name is already registered in the group.
    #[error("there is already a sub-tab named '{name}' registered in group '{group}'")]
    DuplicateTab { group: String, name: String },
}

impl TabError {
    /// Create an invalid name error.
    pub fn invalid_name(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidName {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Create a duplicate tab error.
    pub fn duplicate(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateTab {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Group the rejected tab was aimed at.
    pub fn group(&self) -> &str {
        match self {
            Self::InvalidName { group, .. } | Self::DuplicateTab { group, .. } => group,
        }
    }

    /// Name of the rejected tab.
    pub fn name(&self) -> &str {
        match self {
            Self::InvalidName { name, .. } | Self::DuplicateTab { name, .. } => name,
        }
    }
}
