//! The dynamic inventory contract.
//!
//! A program run with `--list` prints one JSON object:
//!
//! ```json
//! {
//!   "atlanta": { "hosts": ["host1"], "vars": {"b": false}, "children": ["south"] },
//!   "south": ["host2", "host3"],
//!   "_meta": { "hostvars": { "host1": { "a": 1 } } }
//! }
//! ```
//!
//! A group given as a bare list is shorthand for its hosts.

use std::collections::BTreeMap;

use hostmap_common::Vars;
use hostmap_common::inventory::GroupGraph;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::DocumentError;

const META_KEY: &str = "_meta";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GroupEntry {
    Hosts(Vec<String>),
    Group(GroupBody),
}

#[derive(Debug, Default, Deserialize)]
struct GroupBody {
    #[serde(default)]
    hosts: Vec<String>,
    #[serde(default)]
    vars: Vars,
    #[serde(default)]
    children: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    hostvars: BTreeMap<String, Vars>,
}

/// Normalizes a dynamic inventory document into a group graph.
pub fn parse(bytes: &[u8]) -> Result<GroupGraph, DocumentError> {
    let document: Value = serde_json::from_slice(bytes)?;
    let Value::Object(entries) = document else {
        return Err(DocumentError::Shape(
            "dynamic inventory output is not a JSON object".into(),
        ));
    };

    let mut graph = GroupGraph::new();
    let mut meta = Meta::default();

    for (name, value) in entries {
        if name == META_KEY {
            meta = serde_json::from_value(value)
                .map_err(|e| DocumentError::Shape(format!("invalid {META_KEY} section: {e}")))?;
            continue;
        }

        let entry: GroupEntry = serde_json::from_value(value)
            .map_err(|e| DocumentError::Shape(format!("invalid group '{name}': {e}")))?;
        add_group(&mut graph, &name, entry);
    }

    debug!(
        "Dynamic inventory lists {} hosts, {} with hostvars",
        graph.hosts().len(),
        meta.hostvars.len()
    );
    for (host, vars) in meta.hostvars {
        graph.extend_host_vars(&host, vars);
    }

    Ok(graph)
}

fn add_group(graph: &mut GroupGraph, name: &str, entry: GroupEntry) {
    graph.ensure_group(name);
    let body: GroupBody = match entry {
        GroupEntry::Hosts(hosts) => GroupBody {
            hosts,
            ..Default::default()
        },
        GroupEntry::Group(body) => body,
    };

    for host in &body.hosts {
        graph.add_host(name, host);
    }
    for child in &body.children {
        graph.add_child(name, child);
    }
    graph.extend_group_vars(name, body.vars);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
