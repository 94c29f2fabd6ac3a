//! Tab manifests - declarative tab contributions from feature modules.
//!
//! A module can ship a `{module}.tabs.toml` file instead of registering
//! tabs in code:
//!
//! ```toml
//! [[tab]]
//! group = "analytics"
//! name = "scores"
//! title = "Scores"
//! contents = "analytics/scores.html"
//! placement = 10
//! ```
//!
//! Manifests are loaded in file-name order, so registration order (and the
//! tie-break between equal placements) is deterministic.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::tabs::{TabDefinition, TabRegistry};

/// File name suffix that marks a tab manifest.
pub const MANIFEST_SUFFIX: &str = ".tabs.toml";

/// Tabs declared by one module.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabManifest {
    /// Contributing module. Defaults to the manifest's file name without
    /// the suffix.
    #[serde(default)]
    pub module: String,

    /// Tab definitions, in declaration order.
    #[serde(default, rename = "tab")]
    pub tabs: Vec<TabDefinition<String>>,
}

impl TabManifest {
    /// Parse a manifest file from the given path.
    pub fn parse(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tab manifest: {}", path.display()))?;

        Self::parse_str(&content, path)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let mut manifest: TabManifest = toml::from_str(content)
            .with_context(|| format!("failed to parse tab manifest TOML at {}", path.display()))?;

        if manifest.module.is_empty() {
            manifest.module = module_name(path).unwrap_or("unknown").to_string();
        }

        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Validate fields the registry itself does not check.
    ///
    /// Name validation is left to registration so a single bad tab does not
    /// discard the rest of the manifest.
    fn validate(&self, path: &Path) -> Result<()> {
        for tab in &self.tabs {
            if tab.group.is_empty() {
                bail!(
                    "tab '{}' in manifest {} has empty 'group' field",
                    tab.name,
                    path.display()
                );
            }

            if tab.title.is_empty() {
                bail!(
                    "tab '{}' in manifest {} has empty 'title' field",
                    tab.name,
                    path.display()
                );
            }
        }

        Ok(())
    }

    /// Register every tab of this manifest.
    ///
    /// Rejected tabs are logged and skipped. Returns `(registered, rejected)`.
    pub fn register_into(self, registry: &mut TabRegistry<String>) -> (usize, usize) {
        let mut registered = 0;
        let mut rejected = 0;

        for def in self.tabs {
            let group = def.group.clone();
            let name = def.name.clone();

            match registry.register(def) {
                Ok(()) => registered += 1,
                Err(e) => {
                    warn!(
                        module = %self.module,
                        group = %group,
                        tab = %name,
                        error = %e,
                        "failed to register sub-tab"
                    );
                    rejected += 1;
                }
            }
        }

        debug!(module = %self.module, registered, rejected, "applied tab manifest");
        (registered, rejected)
    }
}

/// Module name implied by a manifest path (`scores.tabs.toml` -> `scores`).
fn module_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()?.strip_suffix(MANIFEST_SUFFIX)
}

/// Outcome of loading a manifest directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Manifests parsed successfully.
    pub manifests: usize,
    /// Manifests skipped because they could not be read or parsed.
    pub invalid_manifests: usize,
    /// Tabs registered.
    pub registered: usize,
    /// Tabs rejected by the registry (bad name or duplicate).
    pub rejected: usize,
}

/// Find all tab manifests in a directory, sorted by file name.
///
/// A missing directory is not an error; it simply has no manifests.
pub fn discover_manifests(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        info!(?dir, "tab manifest directory does not exist, nothing to load");
        return Vec::new();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to read tab manifest directory");
            return Vec::new();
        }
    };

    let mut manifests: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && module_name(p).is_some_and(|m| !m.is_empty()))
        .collect();

    manifests.sort();
    manifests
}

/// Load every manifest in `dir` into `registry`.
pub fn load_manifests(registry: &mut TabRegistry<String>, dir: &Path) -> LoadSummary {
    let mut summary = LoadSummary::default();

    for path in discover_manifests(dir) {
        match TabManifest::parse(&path) {
            Ok(manifest) => {
                let (registered, rejected) = manifest.register_into(registry);
                summary.manifests += 1;
                summary.registered += registered;
                summary.rejected += rejected;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse tab manifest");
                summary.invalid_manifests += 1;
            }
        }
    }

    info!(
        dir = %dir.display(),
        manifests = summary.manifests,
        tabs = summary.registered,
        rejected = summary.rejected,
        "tab manifests loaded"
    );
    summary
}

impl TabRegistry<String> {
    /// Create a registry populated from a manifest directory.
    pub fn from_manifests(dir: &Path) -> Self {
        let mut registry = Self::new();
        load_manifests(&mut registry, dir);
        registry
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tabs::{DEFAULT_PLACEMENT, Placed};
    use tabulum_test_utils::{TestDir, test_manifest, test_tab};

    #[test]
    fn parse_valid_manifest() {
        let toml = r#"
module = "gradebook"

[[tab]]
group = "analytics"
name = "scores"
title = "Scores"
contents = "analytics/scores.html"
placement = 10

[[tab]]
group = "analytics"
name = "export"
title = "Export"
href = "gradebook/export"
target = "_blank"
"#;

        let manifest = TabManifest::parse_str(toml, Path::new("x.tabs.toml")).unwrap();
        assert_eq!(manifest.module, "gradebook");
        assert_eq!(manifest.tabs.len(), 2);
        assert_eq!(
            manifest.tabs[0].contents.as_deref(),
            Some("analytics/scores.html")
        );
        assert_eq!(manifest.tabs[0].placement, Some(10));
        assert_eq!(manifest.tabs[1].href.as_deref(), Some("gradebook/export"));
        assert_eq!(manifest.tabs[1].target.as_deref(), Some("_blank"));
        assert_eq!(manifest.tabs[1].placement, None);
    }

    #[test]
    fn module_defaults_to_file_name() {
        let manifest =
            TabManifest::parse_str("", Path::new("/etc/tabs/peer_review.tabs.toml")).unwrap();
        assert_eq!(manifest.module, "peer_review");
        assert!(manifest.tabs.is_empty());
    }

    #[test]
    fn reject_empty_title() {
        let toml = r#"
[[tab]]
group = "analytics"
name = "scores"
title = ""
"#;
        let err = TabManifest::parse_str(toml, Path::new("a.tabs.toml")).unwrap_err();
        assert!(err.to_string().contains("empty 'title'"));
    }

    #[test]
    fn reject_unknown_field() {
        let toml = r#"
[[tab]]
group = "analytics"
name = "typo"
title = "Typo"
placment = 5
"#;
        let err = TabManifest::parse_str(toml, Path::new("typo.tabs.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("placment"), "{err:#}");

        let err = TabManifest::parse_str("modul = \"gradebook\"\n", Path::new("m.tabs.toml"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("modul"), "{err:#}");
    }

    #[test]
    fn misspelled_key_counts_as_invalid_manifest() {
        let dir = TestDir::new("typo");
        dir.write_manifest("a_scores", &[test_tab("analytics", "scores", "Scores").placement(10)]);
        std::fs::write(
            dir.join("zz_typo.tabs.toml"),
            "[[tab]]\ngroup = \"analytics\"\nname = \"typo\"\ntitle = \"Typo\"\nplacment = 5\n",
        )
        .unwrap();

        let mut registry = TabRegistry::new();
        let summary = load_manifests(&mut registry, &dir);
        assert_eq!(
            summary,
            LoadSummary {
                manifests: 1,
                invalid_manifests: 1,
                registered: 1,
                rejected: 0,
            }
        );
        assert!(registry.get_tab("analytics", "typo").is_none());
    }

    #[test]
    fn reject_missing_group() {
        let toml = r#"
[[tab]]
name = "scores"
title = "Scores"
"#;
        let err = TabManifest::parse_str(toml, Path::new("a.tabs.toml")).unwrap_err();
        assert!(err.to_string().contains("a.tabs.toml"));
    }

    #[test]
    fn register_into_skips_bad_tabs() {
        let toml = test_manifest(&[
            test_tab("analytics", "scores", "Scores"),
            test_tab("analytics", "Bad Name", "Bad"),
            test_tab("analytics", "scores", "Duplicate"),
            test_tab("analytics", "trends", "Trends").placement(1),
        ]);
        let manifest = TabManifest::parse_str(&toml, Path::new("m.tabs.toml")).unwrap();

        let mut registry = TabRegistry::new();
        assert_eq!(manifest.register_into(&mut registry), (2, 2));

        let group = registry.get_tab_group("analytics").unwrap();
        assert_eq!(group[0].name(), "trends");
        assert_eq!(group[1].name(), "scores");
        assert_eq!(group[1].title(), "Scores");
        assert_eq!(group[1].placement(), DEFAULT_PLACEMENT);
    }

    #[test]
    fn discover_only_tab_manifests() {
        let dir = TestDir::new("discover");
        std::fs::write(dir.join("b.tabs.toml"), "").unwrap();
        std::fs::write(dir.join("a.tabs.toml"), "").unwrap();
        std::fs::write(dir.join("notes.toml"), "").unwrap();
        std::fs::write(dir.join(".tabs.toml"), "").unwrap();
        std::fs::create_dir(dir.join("nested.tabs.toml")).unwrap();

        let found: Vec<_> = discover_manifests(&dir)
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(found, vec!["a.tabs.toml", "b.tabs.toml"]);
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let dir = TestDir::new("missing");
        let gone = dir.join("does_not_exist");

        let mut registry = TabRegistry::new();
        let summary = load_manifests(&mut registry, &gone);
        assert_eq!(summary, LoadSummary::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn load_keeps_going_past_broken_manifest() {
        let dir = TestDir::new("broken");
        std::fs::write(
            dir.join("a_reports.tabs.toml"),
            test_manifest(&[test_tab("analytics", "reports", "Reports").placement(5)]),
        )
        .unwrap();
        std::fs::write(dir.join("b_broken.tabs.toml"), "[[tab]\nname = ").unwrap();
        std::fs::write(
            dir.join("c_scores.tabs.toml"),
            test_manifest(&[
                test_tab("analytics", "scores", "Scores").placement(5),
                test_tab("analytics", "reports", "Reports again"),
            ]),
        )
        .unwrap();

        let registry = TabRegistry::from_manifests(&dir);
        let placements: Vec<_> = registry
            .get_tab_group("analytics")
            .unwrap()
            .iter()
            .map(|t| (t.name().to_string(), t.placement()))
            .collect();
        assert_eq!(
            placements,
            vec![("reports".to_string(), 5), ("scores".to_string(), 5)]
        );

        let mut again = TabRegistry::new();
        let summary = load_manifests(&mut again, &dir);
        assert_eq!(
            summary,
            LoadSummary {
                manifests: 2,
                invalid_manifests: 1,
                registered: 2,
                rejected: 1,
            }
        );
    }
}
