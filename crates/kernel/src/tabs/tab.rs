//! Tab types and the placement ordering contract.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placement given to tabs registered without one.
///
/// Large enough that unplaced tabs land after every explicitly placed tab
/// in practice.
pub const DEFAULT_PLACEMENT: i64 = 1_000_000;

/// Base path used when a tab computes its own link.
pub const DEFAULT_DESTINATION: &str = "/dashboard";

/// Pattern every sub-tab name must match.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static VALID_TAB_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid regex literal"));

/// Check whether `name` is usable as a sub-tab name.
pub fn is_valid_tab_name(name: &str) -> bool {
    VALID_TAB_NAME.is_match(name)
}

/// Anything ordered in a menu by its placement.
///
/// Placement is the only comparison key; lower values come first.
pub trait Placed {
    fn placement(&self) -> i64;
}

/// Three-way comparison of two placed entries.
pub fn by_placement<T: Placed + ?Sized>(a: &T, b: &T) -> Ordering {
    a.placement().cmp(&b.placement())
}

/// Sort entries by placement, keeping the existing order of ties.
pub fn sort_by_placement<T: Placed>(entries: &mut [T]) {
    entries.sort_by(by_placement);
}

/// Registration input for a sub-tab.
///
/// Manifests deserialize straight into this; code usually builds it with
/// [`TabDefinition::new`] and the `with_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabDefinition<C> {
    /// Group the tab belongs to (e.g., "analytics").
    pub group: String,
    /// Machine name, unique within the group.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Renderable content reference, interpreted by the host.
    #[serde(default)]
    pub contents: Option<C>,
    /// Absolute link override, without the leading slash.
    #[serde(default)]
    pub href: Option<String>,
    /// Link target window.
    #[serde(default)]
    pub target: Option<String>,
    /// Sort key (defaults to [`DEFAULT_PLACEMENT`]).
    #[serde(default)]
    pub placement: Option<i64>,
}

impl<C> TabDefinition<C> {
    /// Create a definition with only the required fields set.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            title: title.into(),
            contents: None,
            href: None,
            target: None,
            placement: None,
        }
    }

    /// Attach renderable contents.
    pub fn with_contents(mut self, contents: C) -> Self {
        self.contents = Some(contents);
        self
    }

    /// Link to `/<href>` instead of the generated dashboard URL.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set the link target window.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set an explicit placement.
    pub fn with_placement(mut self, placement: i64) -> Self {
        self.placement = Some(placement);
        self
    }
}

/// A registered sub-tab.
///
/// Everything except `contents` is fixed at registration. Instances are
/// owned by [`TabRegistry`](super::TabRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab<C> {
    group: String,
    name: String,
    title: String,
    contents: Option<C>,
    href: Option<String>,
    target: Option<String>,
    placement: i64,
}

impl<C> Tab<C> {
    /// Build a tab from an already validated definition.
    pub(super) fn from_definition(def: TabDefinition<C>) -> Self {
        Self {
            group: def.group,
            name: def.name,
            title: def.title,
            contents: def.contents,
            href: def.href,
            target: def.target,
            placement: def.placement.unwrap_or(DEFAULT_PLACEMENT),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn contents(&self) -> Option<&C> {
        self.contents.as_ref()
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub(super) fn contents_mut(&mut self) -> Option<&mut C> {
        self.contents.as_mut()
    }

    /// Replace the contents, returning the previous value.
    pub(super) fn replace_contents(&mut self, contents: Option<C>) -> Option<C> {
        std::mem::replace(&mut self.contents, contents)
    }

    /// URL the tab navigates to.
    ///
    /// An `href` wins and becomes `/<href>`. Otherwise the link is
    /// `<destination>?action=<group>&tab=<name>`. An empty `href` counts
    /// as unset.
    pub fn computed_href(&self, destination: &str) -> String {
        match self.href.as_deref() {
            Some(href) if !href.is_empty() => format!("/{href}"),
            _ => format!("{destination}?action={}&tab={}", self.group, self.name),
        }
    }

    /// [`computed_href`](Self::computed_href) against [`DEFAULT_DESTINATION`].
    pub fn default_href(&self) -> String {
        self.computed_href(DEFAULT_DESTINATION)
    }
}

impl<C> Placed for Tab<C> {
    fn placement(&self) -> i64 {
        self.placement
    }
}

/// A top-level navigation entry.
///
/// Not stored in the registry; hosts keep their own list and order it with
/// [`sort_by_placement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavTab {
    name: String,
    title: String,
    placement: i64,
}

impl NavTab {
    /// Create a navigation entry. Without a placement it sorts last.
    pub fn new(name: impl Into<String>, title: impl Into<String>, placement: Option<i64>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            placement: placement.unwrap_or(i64::MAX),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Placed for NavTab {
    fn placement(&self) -> i64 {
        self.placement
    }
}
