//! Joins resolved inventory data with loaded facts into the final
//! [`HostModel`].

use std::collections::BTreeSet;

use hostmap_common::facts::FactDocument;
use hostmap_common::host::{HostModel, ResolvedHost};
use hostmap_common::inventory::{ALL_GROUP, UNGROUPED_GROUP};
use tracing::debug;

use crate::facts::FactMap;
use crate::resolver::{HostResolution, VariableResolver};

/// Builds one record per host known to either side.
///
/// Hosts only the inventory knows get empty facts. Hosts only the facts know
/// sit in `all` and `ungrouped` and carry no variables.
pub fn build(resolver: &VariableResolver<'_>, mut facts: FactMap) -> HostModel {
    let graph = resolver.graph();
    let mut model = HostModel::new();

    for (name, resolution) in resolver.resolve_all() {
        let document: FactDocument = facts.remove(&name).unwrap_or_default();
        model.insert(name.clone(), record(name, resolution, document));
    }

    for (name, document) in facts {
        debug!("{name} has facts but no inventory entry");
        let resolution = HostResolution {
            hostvars: Default::default(),
            groups: BTreeSet::from([ALL_GROUP.to_string(), UNGROUPED_GROUP.to_string()]),
        };
        model.insert(name.clone(), record(name, resolution, document));
    }

    debug!(
        "Built {} host records ({} from the inventory)",
        model.len(),
        graph.hosts().len()
    );
    model
}

fn record(name: String, resolution: HostResolution, document: FactDocument) -> ResolvedHost {
    let mut host = ResolvedHost::new(name).with_facts(document);
    host.hostvars = resolution.hostvars;
    host.groups = resolution.groups;
    host
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
