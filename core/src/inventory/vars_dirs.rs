//! `group_vars/` and `host_vars/` next to an inventory.
//!
//! Each entry is named after a group or host, optionally with a `.yml`,
//! `.yaml` or `.json` extension, or is a directory of such files merged in
//! name order. Values override what the inventory itself declared for that
//! group or host.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hostmap_common::Vars;
use hostmap_common::error::{ResolveError, Result};
use hostmap_common::inventory::GroupGraph;
use hostmap_protocols::vars::{self, VARS_EXTENSIONS};
use tracing::debug;

use super::read_error;

const GROUP_VARS_DIR: &str = "group_vars";
const HOST_VARS_DIR: &str = "host_vars";

pub fn apply(root: &Path, graph: &mut GroupGraph) -> Result<()> {
    for (group, vars) in read_vars_dir(&root.join(GROUP_VARS_DIR))? {
        if graph.contains_group(&group) {
            graph.extend_group_vars(&group, vars);
        } else {
            debug!("group_vars for unknown group '{group}' ignored");
        }
    }

    for (host, vars) in read_vars_dir(&root.join(HOST_VARS_DIR))? {
        if graph.contains_host(&host) {
            graph.extend_host_vars(&host, vars);
        } else {
            debug!("host_vars for unknown host '{host}' ignored");
        }
    }

    Ok(())
}

fn read_vars_dir(dir: &Path) -> Result<BTreeMap<String, Vars>> {
    let mut found: BTreeMap<String, Vars> = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(found);
    }

    for path in sorted_entries(dir)? {
        if path.is_dir() {
            let name: String = file_name(&path);
            let merged = found.entry(name).or_default();
            for file in sorted_entries(&path)? {
                if file.is_file() {
                    merged.extend(read_vars_file(&file)?);
                }
            }
        } else if path.is_file() {
            found
                .entry(entry_name(&path))
                .or_default()
                .extend(read_vars_file(&path)?);
        }
    }

    Ok(found)
}

fn read_vars_file(path: &Path) -> Result<Vars> {
    let text: String = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    vars::parse(&text)
        .map_err(|e| ResolveError::syntax(path, e.line().unwrap_or(0), e.to_string()))
}

/// Non-hidden entries of `dir`, sorted by name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| read_error(dir, e))? {
        let path: PathBuf = entry.map_err(|e| read_error(dir, e))?.path();
        if !file_name(&path).starts_with('.') {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `web.yml` names `web`; `db.dev.local` keeps its dots.
fn entry_name(path: &Path) -> String {
    let known_extension: bool = path
        .extension()
        .is_some_and(|ext| VARS_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()));
    match path.file_stem() {
        Some(stem) if known_extension => stem.to_string_lossy().into_owned(),
        _ => file_name(path),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
