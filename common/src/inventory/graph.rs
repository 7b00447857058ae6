use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::trace;

use crate::Vars;

pub const ALL_GROUP: &str = "all";
pub const UNGROUPED_GROUP: &str = "ungrouped";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub vars: Vars,
    pub hosts: BTreeSet<String>,
    pub children: BTreeSet<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Groups, their parent/child links, and host-level variables as declared
/// by one or more inventory sources. Nothing is resolved yet.
///
/// `all` and `ungrouped` always exist. Groups remember the order they were
/// first declared in, which breaks precedence ties between siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupGraph {
    groups: BTreeMap<String, Group>,
    order: Vec<String>,
    hosts: BTreeSet<String>,
    host_vars: BTreeMap<String, Vars>,
}

impl Default for GroupGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            groups: BTreeMap::new(),
            order: Vec::new(),
            hosts: BTreeSet::new(),
            host_vars: BTreeMap::new(),
        };
        graph.ensure_group(ALL_GROUP);
        graph.ensure_group(UNGROUPED_GROUP);
        graph
    }

    /// Returns the group, declaring it first if needed.
    pub fn ensure_group(&mut self, name: &str) -> &mut Group {
        if !self.groups.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name))
    }

    /// Records a host without placing it in any group.
    pub fn declare_host(&mut self, host: &str) {
        self.hosts.insert(host.to_string());
    }

    pub fn add_host(&mut self, group: &str, host: &str) {
        self.declare_host(host);
        self.ensure_group(group).hosts.insert(host.to_string());
    }

    /// Links `child` under `parent`, declaring both when unknown.
    pub fn add_child(&mut self, parent: &str, child: &str) {
        self.ensure_group(parent).children.insert(child.to_string());
        self.ensure_group(child);
    }

    pub fn set_group_var(&mut self, group: &str, key: impl Into<String>, value: Value) {
        self.ensure_group(group).vars.insert(key.into(), value);
    }

    pub fn set_host_var(&mut self, host: &str, key: impl Into<String>, value: Value) {
        self.declare_host(host);
        self.host_vars
            .entry(host.to_string())
            .or_default()
            .insert(key.into(), value);
    }

    /// Overlays `vars` on the group's own, key for key.
    pub fn extend_group_vars(&mut self, group: &str, vars: Vars) {
        self.ensure_group(group).vars.extend(vars);
    }

    pub fn extend_host_vars(&mut self, host: &str, vars: Vars) {
        self.declare_host(host);
        self.host_vars
            .entry(host.to_string())
            .or_default()
            .extend(vars);
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn contains_host(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.order.iter().filter_map(|name| self.groups.get(name))
    }

    pub fn hosts(&self) -> &BTreeSet<String> {
        &self.hosts
    }

    pub fn host_vars(&self, host: &str) -> Option<&Vars> {
        self.host_vars.get(host)
    }

    pub fn declaration_index(&self, group: &str) -> Option<usize> {
        self.order.iter().position(|name| name == group)
    }

    /// Folds a graph loaded later into this one.
    ///
    /// Hosts, children and groups accumulate; variables from `other` override
    /// ours key for key. Groups new to us keep `other`'s declaration order.
    pub fn merge(&mut self, other: GroupGraph) {
        let GroupGraph {
            mut groups,
            order,
            hosts,
            host_vars,
        } = other;
        trace!("Merging {} groups and {} hosts", order.len(), hosts.len());

        for name in order {
            let Some(incoming) = groups.remove(&name) else {
                continue;
            };
            let group = self.ensure_group(&name);
            group.vars.extend(incoming.vars);
            group.hosts.extend(incoming.hosts);
            group.children.extend(incoming.children);
        }

        self.hosts.extend(hosts);
        for (host, vars) in host_vars {
            self.extend_host_vars(&host, vars);
        }
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
