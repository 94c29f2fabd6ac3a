#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Tabulum test utilities.
//!
//! Helpers for testing: tab manifest builders, self-cleaning temporary
//! directories, and assertion utilities.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Create a test tab with only the required fields.
pub fn test_tab(group: &str, name: &str, title: &str) -> TestTab {
    TestTab {
        group: group.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        contents: None,
        href: None,
        target: None,
        placement: None,
    }
}

/// A tab entry builder for manifest fixtures.
#[derive(Debug, Clone, Serialize)]
pub struct TestTab {
    pub group: String,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<i64>,
}

impl TestTab {
    /// Set the contents reference.
    pub fn contents(mut self, contents: &str) -> Self {
        self.contents = Some(contents.to_string());
        self
    }

    /// Set a link override.
    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    /// Set the link target.
    pub fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    /// Set an explicit placement.
    pub fn placement(mut self, placement: i64) -> Self {
        self.placement = Some(placement);
        self
    }
}

#[derive(Serialize)]
struct TestManifest<'a> {
    tab: &'a [TestTab],
}

/// Render tabs as the body of a `*.tabs.toml` manifest.
pub fn test_manifest(tabs: &[TestTab]) -> String {
    toml::to_string(&TestManifest { tab: tabs }).expect("test manifest serializes to TOML")
}

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// RAII guard for test directories. Automatically removes the directory
/// on drop, guaranteeing cleanup even if the test panics.
#[derive(Debug)]
pub struct TestDir(PathBuf);

impl TestDir {
    /// Create a fresh, empty directory under the system temp dir.
    pub fn new(name: &str) -> Self {
        let n = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path =
            std::env::temp_dir().join(format!("tabulum_test_{name}_{n}_{}", std::process::id()));
        // Remove leftovers from a previous run, if any
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self(path)
    }

    /// Write a manifest file into the directory and return its path.
    pub fn write_manifest(&self, module: &str, tabs: &[TestTab]) -> PathBuf {
        let path = self.0.join(format!("{module}.tabs.toml"));
        std::fs::write(&path, test_manifest(tabs)).unwrap();
        path
    }
}

impl Deref for TestDir {
    type Target = Path;
    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TestDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Assertion helpers for rendered output.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that `needles` appear in `haystack` in the given order.
    pub fn in_order(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!("Expected '{needle}' after offset {from}\nActual: {haystack}"),
            }
        }
    }
}
