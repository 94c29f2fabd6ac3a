//! Tabulum Kernel Library
//!
//! Dashboard sub-tab registry plus the manifest loader, configuration and
//! CLI commands used by the `tabulum` binary.

pub mod cli;
pub mod config;
pub mod manifest;
pub mod tabs;
