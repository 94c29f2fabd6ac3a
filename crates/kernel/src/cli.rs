//! CLI command implementations for inspecting registered tabs.
//!
//! Commands print to stdout; the `render_*` helpers return the text so it
//! can be checked without capturing output.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::tabs::{Placed, Tab, TabRegistry};

/// One row of `tabulum list --json`.
#[derive(Debug, Serialize)]
struct TabRow<'a> {
    group: &'a str,
    name: &'a str,
    title: &'a str,
    placement: i64,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<&'a str>,
}

impl<'a> TabRow<'a> {
    fn new(tab: &'a Tab<String>, destination: &str) -> Self {
        Self {
            group: tab.group(),
            name: tab.name(),
            title: tab.title(),
            placement: tab.placement(),
            url: tab.computed_href(destination),
            target: tab.target(),
            contents: tab.contents().map(String::as_str),
        }
    }
}

/// Groups to show, sorted by name so output is stable.
fn selected_groups<'a>(
    registry: &'a TabRegistry<String>,
    group: Option<&'a str>,
) -> Result<Vec<&'a str>> {
    match group {
        Some(group) => {
            if registry.get_tab_group(group).is_none() {
                bail!("no tabs registered in group '{group}'");
            }
            Ok(vec![group])
        }
        None => {
            let mut groups: Vec<_> = registry.group_names().collect();
            groups.sort_unstable();
            Ok(groups)
        }
    }
}

fn rows<'a>(
    registry: &'a TabRegistry<String>,
    groups: &[&str],
    destination: &str,
) -> Vec<TabRow<'a>> {
    groups
        .iter()
        .filter_map(|g| registry.get_tab_group(g))
        .flatten()
        .map(|tab| TabRow::new(tab, destination))
        .collect()
}

/// Render the tab listing as a text table.
pub fn render_list(
    registry: &TabRegistry<String>,
    group: Option<&str>,
    destination: &str,
) -> Result<String> {
    let groups = selected_groups(registry, group)?;
    let mut out = String::new();

    if groups.is_empty() {
        out.push_str("No tabs registered.\n");
        return Ok(out);
    }

    writeln!(
        out,
        "{:<16} {:<20} {:<24} {:>10}  URL",
        "GROUP", "TAB", "TITLE", "PLACEMENT"
    )?;
    writeln!(out, "{}", "-".repeat(80))?;

    for row in rows(registry, &groups, destination) {
        writeln!(
            out,
            "{:<16} {:<20} {:<24} {:>10}  {}",
            row.group, row.name, row.title, row.placement, row.url
        )?;
    }

    Ok(out)
}

/// Render the tab listing as a JSON array.
pub fn render_list_json(
    registry: &TabRegistry<String>,
    group: Option<&str>,
    destination: &str,
) -> Result<String> {
    let groups = selected_groups(registry, group)?;
    serde_json::to_string_pretty(&rows(registry, &groups, destination))
        .context("failed to serialize tab listing")
}

/// Render the details of one tab.
pub fn render_tab(
    registry: &TabRegistry<String>,
    group: &str,
    name: &str,
    destination: &str,
) -> Result<String> {
    let tab = registry
        .get_tab(group, name)
        .with_context(|| format!("no tab '{name}' registered in group '{group}'"))?;

    let mut out = String::new();
    writeln!(out, "group:     {}", tab.group())?;
    writeln!(out, "name:      {}", tab.name())?;
    writeln!(out, "title:     {}", tab.title())?;
    writeln!(out, "placement: {}", tab.placement())?;
    writeln!(out, "url:       {}", tab.computed_href(destination))?;
    if let Some(target) = tab.target() {
        writeln!(out, "target:    {target}")?;
    }
    if let Some(contents) = tab.contents() {
        writeln!(out, "contents:  {contents}")?;
    }
    Ok(out)
}

/// List registered tabs, optionally limited to one group.
pub fn cmd_list(
    registry: &TabRegistry<String>,
    group: Option<&str>,
    destination: &str,
    json: bool,
) -> Result<()> {
    let out = if json {
        render_list_json(registry, group, destination)?
    } else {
        render_list(registry, group, destination)?
    };
    println!("{}", out.trim_end());
    Ok(())
}

/// Show a single tab.
pub fn cmd_show(
    registry: &TabRegistry<String>,
    group: &str,
    name: &str,
    destination: &str,
) -> Result<()> {
    let out = render_tab(registry, group, name, destination)?;
    print!("{out}");
    Ok(())
}

/// Print the group holding a tab name.
pub fn cmd_group_of(registry: &TabRegistry<String>, name: &str) -> Result<()> {
    let group = registry
        .get_group_name_for_tab(name)
        .with_context(|| format!("no group contains a tab named '{name}'"))?;
    println!("{group}");
    Ok(())
}
