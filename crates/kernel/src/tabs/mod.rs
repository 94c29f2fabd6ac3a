//! Dashboard sub-tab registration.
//!
//! Feature modules contribute tabs to named groups (menu sections such as
//! "analytics"). The registry provides:
//! - Validated registration with per-group unique names
//! - Groups kept in ascending placement order, ties in registration order
//! - Lookup by group and name, and link computation for each tab

mod error;
mod registry;
mod shared;
mod tab;

pub use error::TabError;
pub use registry::{TabContentsMut, TabRegistry};
pub use shared::SharedTabRegistry;
pub use tab::{
    DEFAULT_DESTINATION, DEFAULT_PLACEMENT, NavTab, Placed, Tab, TabDefinition, by_placement,
    is_valid_tab_name, sort_by_placement,
};
