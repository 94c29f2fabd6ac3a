//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::tabs::DEFAULT_DESTINATION;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory scanned for `*.tabs.toml` manifests (default: ./tabs).
    pub manifests_dir: PathBuf,

    /// Base path generated tab links point at (default: /dashboard).
    pub destination: String,
}

/// Values supplied on the command line, applied over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub manifests_dir: Option<PathBuf>,
    pub destination: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(ConfigOverrides::default())
    }

    /// Load configuration from environment variables, letting `overrides`
    /// replace them before validation.
    pub fn from_env_with(overrides: ConfigOverrides) -> Result<Self> {
        Self::from_lookup_with(|key| env::var(key).ok(), overrides)
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `from_env` goes through here; tests pass a map instead of touching
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::from_lookup_with(lookup, ConfigOverrides::default())
    }

    /// Like [`from_lookup`](Self::from_lookup), with overrides taking
    /// precedence over looked-up values.
    pub fn from_lookup_with(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let manifests_dir = overrides
            .manifests_dir
            .or_else(|| lookup("TAB_MANIFESTS_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("./tabs"));

        let destination = overrides
            .destination
            .or_else(|| lookup("DASHBOARD_DESTINATION"))
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());
        validate_destination(&destination)?;

        Ok(Self {
            manifests_dir,
            destination,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifests_dir: PathBuf::from("./tabs"),
            destination: DEFAULT_DESTINATION.to_string(),
        }
    }
}

/// Destinations are absolute paths without a query string.
pub fn validate_destination(destination: &str) -> Result<()> {
    if !destination.starts_with('/') {
        bail!("DASHBOARD_DESTINATION must be an absolute path starting with '/', got '{destination}'");
    }
    if destination.contains('?') {
        bail!("DASHBOARD_DESTINATION must not contain a query string, got '{destination}'");
    }
    Ok(())
}
