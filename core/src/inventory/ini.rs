//! Static INI inventories.
//!
//! ```ini
//! web[01-03].dev.local          # lines before any header are ungrouped
//!
//! [db]
//! db.dev.local function=db
//!
//! [dev:children]
//! db
//!
//! [dev:vars]
//! dtap=dev
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hostmap_common::Vars;
use hostmap_common::error::{ResolveError, Result};
use hostmap_common::inventory::{GroupGraph, range};
use hostmap_protocols::ini;
use serde_json::Value;

use super::{InventorySource, read_error};

const PORT_VAR: &str = "ansible_port";

pub struct StaticInventory {
    path: PathBuf,
}

impl StaticInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InventorySource for StaticInventory {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<GroupGraph> {
        let text: String = fs::read_to_string(&self.path).map_err(|e| read_error(&self.path, e))?;
        parse(&text, &self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    TopLevel,
    Hosts(String),
    Vars(String),
    Children(String),
}

impl Section {
    fn group(&self) -> Option<&str> {
        match self {
            Section::TopLevel => None,
            Section::Hosts(name) | Section::Vars(name) | Section::Children(name) => Some(name),
        }
    }
}

/// Parses one INI document. `path` is only used in error messages.
pub fn parse(text: &str, path: &Path) -> Result<GroupGraph> {
    let mut graph = GroupGraph::new();
    let mut section = Section::TopLevel;

    for (idx, raw_line) in text.lines().enumerate() {
        let line: &str = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let outcome: std::result::Result<(), String> = if line.starts_with('[') {
            parse_header(line).map(|next| {
                if let Some(group) = next.group() {
                    graph.ensure_group(group);
                }
                section = next;
            })
        } else {
            match &section {
                Section::TopLevel => parse_host_line(&mut graph, None, line),
                Section::Hosts(group) => parse_host_line(&mut graph, Some(group.as_str()), line),
                Section::Vars(group) => parse_var_line(&mut graph, group, line),
                Section::Children(group) => parse_child_line(&mut graph, group, line),
            }
        };

        outcome.map_err(|message| ResolveError::syntax(path, idx + 1, message))?;
    }

    Ok(graph)
}

fn parse_header(line: &str) -> std::result::Result<Section, String> {
    let Some(end) = line.find(']') else {
        return Err(format!("unterminated section header '{line}'"));
    };
    let rest: &str = line[end + 1..].trim();
    if !rest.is_empty() && !rest.starts_with('#') && !rest.starts_with(';') {
        return Err(format!("unexpected text after section header: '{rest}'"));
    }

    let inner: &str = line[1..end].trim();
    let (name, qualifier) = match inner.split_once(':') {
        Some((name, qualifier)) => (name.trim(), Some(qualifier.trim())),
        None => (inner, None),
    };
    if name.is_empty() || name.contains(char::is_whitespace) || name.contains('[') {
        return Err(format!("invalid group name '{name}'"));
    }

    match qualifier {
        None => Ok(Section::Hosts(name.to_string())),
        Some("vars") => Ok(Section::Vars(name.to_string())),
        Some("children") => Ok(Section::Children(name.to_string())),
        Some(other) => Err(format!("unknown section type ':{other}' for group '{name}'")),
    }
}

fn parse_host_line(
    graph: &mut GroupGraph,
    group: Option<&str>,
    line: &str,
) -> std::result::Result<(), String> {
    let tokens: Vec<String> = ini::tokenize(line).map_err(|e| e.to_string())?;
    let Some((pattern, assignments)) = tokens.split_first() else {
        return Ok(());
    };

    let (pattern, port) = split_port(pattern);
    let hosts: Vec<String> = range::expand(pattern).map_err(|e| e.to_string())?;

    let mut vars = Vars::new();
    if let Some(port) = port {
        vars.insert(PORT_VAR.to_string(), Value::from(port));
    }
    for token in assignments {
        let (key, value) = ini::key_value(token)
            .ok_or_else(|| format!("expected key=value, found '{token}'"))?;
        vars.insert(key, value);
    }

    for host in hosts {
        match group {
            Some(group) => graph.add_host(group, &host),
            None => graph.declare_host(&host),
        }
        if !vars.is_empty() {
            graph.extend_host_vars(&host, vars.clone());
        }
    }
    Ok(())
}

fn parse_var_line(
    graph: &mut GroupGraph,
    group: &str,
    line: &str,
) -> std::result::Result<(), String> {
    let (key, value) =
        ini::key_value(line).ok_or_else(|| format!("expected key=value, found '{line}'"))?;
    graph.set_group_var(group, key, value);
    Ok(())
}

fn parse_child_line(
    graph: &mut GroupGraph,
    group: &str,
    line: &str,
) -> std::result::Result<(), String> {
    let tokens: Vec<String> = ini::tokenize(line).map_err(|e| e.to_string())?;
    match tokens.as_slice() {
        [] => Ok(()),
        [child] => {
            graph.add_child(group, child);
            Ok(())
        }
        [child, extra, ..] => Err(format!(
            "unexpected '{extra}' after child group '{child}'"
        )),
    }
}

/// Splits a trailing `:port` off a host pattern. Colons inside the range
/// brackets, and addresses with more than one colon, are left alone.
fn split_port(pattern: &str) -> (&str, Option<u16>) {
    let mut depth: usize = 0;
    let mut colon: Option<usize> = None;
    for (i, c) in pattern.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                if colon.is_some() {
                    return (pattern, None);
                }
                colon = Some(i);
            }
            _ => {}
        }
    }

    match colon {
        Some(i) => match pattern[i + 1..].parse::<u16>() {
            Ok(port) => (&pattern[..i], Some(port)),
            Err(_) => (pattern, None),
        },
        None => (pattern, None),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HOSTS: &str = r#"
# Development
bastion.dev.local

[db]
db.dev.local function=db

[web]
web[01-03].dev.local function=web

[dev:children]
db
web

[dev:vars]
dtap=dev

[dev_local:children]
dev
"#;

    fn parse_ok(text: &str) -> GroupGraph {
        parse(text, Path::new("hosts")).unwrap()
    }

    fn syntax_line(text: &str) -> usize {
        match parse(text, Path::new("hosts")) {
            Err(ResolveError::InventorySyntax { line, .. }) => line,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_sections() {
        let graph = parse_ok(HOSTS);

        assert!(graph.contains_host("bastion.dev.local"));
        assert!(graph.group("db").unwrap().hosts.contains("db.dev.local"));
        assert_eq!(graph.group("web").unwrap().hosts.len(), 3);
        assert!(graph.group("web").unwrap().hosts.contains("web02.dev.local"));

        let dev = graph.group("dev").unwrap();
        assert!(dev.children.contains("db"));
        assert!(dev.children.contains("web"));
        assert_eq!(dev.vars["dtap"], json!("dev"));
        assert!(graph.group("dev_local").unwrap().children.contains("dev"));
    }

    #[test]
    fn test_inline_vars_are_host_vars() {
        let graph = parse_ok(HOSTS);

        assert_eq!(graph.host_vars("db.dev.local").unwrap()["function"], json!("db"));
        assert_eq!(graph.host_vars("web03.dev.local").unwrap()["function"], json!("web"));
        assert!(graph.group("db").unwrap().vars.is_empty());
    }

    #[test]
    fn test_top_level_hosts_have_no_group() {
        let graph = parse_ok(HOSTS);
        assert!(
            graph
                .groups()
                .all(|group| !group.hosts.contains("bastion.dev.local"))
        );
    }

    #[test]
    fn test_children_before_declaration() {
        let graph = parse_ok("[parent:children]\nlater\n\n[later]\nhost1\n");
        assert!(graph.group("parent").unwrap().children.contains("later"));
        assert!(graph.group("later").unwrap().hosts.contains("host1"));
    }

    #[test]
    fn test_port_and_literals() {
        let graph = parse_ok("[web]\nweb01:2222 enabled=False weight=3 motd=\"a b\"\n");
        let vars = graph.host_vars("web01").unwrap();
        assert_eq!(vars["ansible_port"], json!(2222));
        assert_eq!(vars["enabled"], json!(false));
        assert_eq!(vars["weight"], json!(3));
        assert_eq!(vars["motd"], json!("a b"));
    }

    #[test]
    fn test_split_port() {
        assert_eq!(split_port("web01:22"), ("web01", Some(22)));
        assert_eq!(split_port("db[01:03]"), ("db[01:03]", None));
        assert_eq!(split_port("db[1:3]:2222"), ("db[1:3]", Some(2222)));
        assert_eq!(split_port("fe80::1"), ("fe80::1", None));
        assert_eq!(split_port("plain"), ("plain", None));
    }

    #[test]
    fn test_header_with_trailing_comment() {
        let graph = parse_ok("[web] # frontends\nweb01\n");
        assert!(graph.group("web").unwrap().hosts.contains("web01"));
    }

    #[test]
    fn test_syntax_errors_carry_line_numbers() {
        assert_eq!(syntax_line("[web\nweb01\n"), 1);
        assert_eq!(syntax_line("[web]\nweb01\n[web:bogus]\n"), 3);
        assert_eq!(syntax_line("[web:vars]\nnot_an_assignment\n"), 2);
        assert_eq!(syntax_line("[web]\nweb[01-03\n"), 2);
        assert_eq!(syntax_line("[web]\nweb[1-2].rack[a-b]\n"), 2);
        assert_eq!(syntax_line("[web]\nweb01 stray\n"), 2);
        assert_eq!(syntax_line("[]\n"), 1);
    }
}
