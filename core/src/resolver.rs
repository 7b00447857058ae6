//! # Variable Resolver
//!
//! Walks a [`GroupGraph`] to compute, for each host, the full set of groups
//! it belongs to and its final variables.
//!
//! Membership flows upwards: a host in a child group is a member of every
//! ancestor, and always of `all`. Variables are layered lowest first:
//!
//! 1. `all`,
//! 2. every other group, shallow to deep (a child overrides its parents),
//!    siblings at the same depth in declaration order,
//! 3. variables declared on the host itself.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use hostmap_common::Vars;
use hostmap_common::error::{ResolveError, Result};
use hostmap_common::inventory::{ALL_GROUP, GroupGraph, UNGROUPED_GROUP};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostResolution {
    pub hostvars: Vars,
    pub groups: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

pub struct VariableResolver<'a> {
    graph: &'a GroupGraph,
    parents: HashMap<&'a str, BTreeSet<&'a str>>,
    depth: HashMap<&'a str, usize>,
}

impl<'a> VariableResolver<'a> {
    /// Prepares the graph for resolution. Fails on the first cycle found.
    pub fn new(graph: &'a GroupGraph) -> Result<Self> {
        check_cycles(graph)?;

        let mut parents: HashMap<&'a str, BTreeSet<&'a str>> = HashMap::new();
        for group in graph.groups() {
            parents.entry(group.name.as_str()).or_default();
            for child in &group.children {
                parents
                    .entry(child.as_str())
                    .or_default()
                    .insert(group.name.as_str());
            }
        }
        for (name, group_parents) in parents.iter_mut() {
            if *name != ALL_GROUP && group_parents.is_empty() {
                group_parents.insert(ALL_GROUP);
            }
        }

        let mut resolver = Self {
            graph,
            parents,
            depth: HashMap::new(),
        };
        resolver.compute_depths();
        Ok(resolver)
    }

    pub fn graph(&self) -> &'a GroupGraph {
        self.graph
    }

    /// Resolves every host the graph declares.
    pub fn resolve_all(&self) -> BTreeMap<String, HostResolution> {
        self.graph
            .hosts()
            .iter()
            .map(|host| (host.clone(), self.resolve_host(host)))
            .collect()
    }

    /// Resolves one host. Hosts the graph does not know end up in `all`
    /// and `ungrouped` only.
    pub fn resolve_host(&self, host: &str) -> HostResolution {
        let groups: BTreeSet<String> = self.memberships(host);

        let mut ordered: Vec<&str> = groups.iter().map(String::as_str).collect();
        ordered.sort_by_key(|group| {
            (
                self.depth.get(*group).copied().unwrap_or(0),
                self.graph.declaration_index(group).unwrap_or(usize::MAX),
            )
        });

        let mut hostvars = Vars::new();
        for name in ordered {
            if let Some(group) = self.graph.group(name) {
                hostvars.extend(group.vars.clone());
            }
        }
        if let Some(vars) = self.graph.host_vars(host) {
            hostvars.extend(vars.clone());
        }

        HostResolution { hostvars, groups }
    }

    /// Direct groups plus all their ancestors.
    fn memberships(&self, host: &str) -> BTreeSet<String> {
        let mut direct: Vec<&str> = self
            .graph
            .groups()
            .filter(|group| group.hosts.contains(host))
            .map(|group| group.name.as_str())
            .collect();

        let explicit: bool = direct
            .iter()
            .any(|group| *group != ALL_GROUP && *group != UNGROUPED_GROUP);
        if explicit {
            direct.retain(|group| *group != UNGROUPED_GROUP);
        } else {
            direct.push(UNGROUPED_GROUP);
        }

        let mut groups: BTreeSet<String> = BTreeSet::from([ALL_GROUP.to_string()]);
        let mut todo: Vec<&str> = direct;
        while let Some(group) = todo.pop() {
            if !groups.insert(group.to_string()) {
                continue;
            }
            if let Some(parents) = self.parents.get(group) {
                todo.extend(parents.iter().copied());
            }
        }
        groups
    }

    fn compute_depths(&mut self) {
        let names: Vec<&'a str> = self.parents.keys().copied().collect();
        for name in names {
            self.depth_of(name);
        }
    }

    /// Longest distance from `all`.
    fn depth_of(&mut self, name: &'a str) -> usize {
        if name == ALL_GROUP {
            return 0;
        }
        if let Some(depth) = self.depth.get(name) {
            return *depth;
        }

        let parents: Vec<&'a str> = self
            .parents
            .get(name)
            .map(|parents| parents.iter().copied().collect())
            .unwrap_or_default();
        let depth: usize = 1 + parents
            .into_iter()
            .map(|parent| self.depth_of(parent))
            .max()
            .unwrap_or(0);

        self.depth.insert(name, depth);
        depth
    }
}

/// Visited/in-progress walk over the children edges.
fn check_cycles(graph: &GroupGraph) -> Result<()> {
    let mut state: HashMap<&str, Visit> = HashMap::new();
    let mut path: Vec<&str> = Vec::new();

    for group in graph.groups() {
        if group.children.contains(ALL_GROUP) {
            return Err(ResolveError::GroupCycle {
                cycle: vec![
                    ALL_GROUP.to_string(),
                    group.name.clone(),
                    ALL_GROUP.to_string(),
                ],
            });
        }
        visit(graph, &group.name, &mut state, &mut path)?;
    }
    Ok(())
}

fn visit<'g>(
    graph: &'g GroupGraph,
    name: &'g str,
    state: &mut HashMap<&'g str, Visit>,
    path: &mut Vec<&'g str>,
) -> Result<()> {
    match state.get(name) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => {
            let start: usize = path.iter().position(|g| *g == name).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|g| g.to_string()).collect();
            cycle.push(name.to_string());
            return Err(ResolveError::GroupCycle { cycle });
        }
        None => {}
    }

    state.insert(name, Visit::InProgress);
    path.push(name);
    if let Some(group) = graph.group(name) {
        for child in &group.children {
            visit(graph, child, state, path)?;
        }
    }
    path.pop();
    state.insert(name, Visit::Done);
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
