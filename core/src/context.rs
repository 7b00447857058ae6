//! # Resolution Context
//!
//! Implements the one use case of the engine: turn fact sources and an
//! optional inventory into a [`HostModel`].

use hostmap_common::config::Config;
use hostmap_common::error::{ResolveError, Result};
use hostmap_common::host::HostModel;
use hostmap_common::inventory::GroupGraph;
use tracing::{Instrument, info, info_span};

use crate::builder;
use crate::facts::{FactLoader, FactMap};
use crate::inventory;
use crate::limit::Limit;
use crate::resolver::VariableResolver;

/// Runs a full resolution pass for one [`Config`].
///
/// The pass either yields the complete model or the first error; nothing
/// partial is handed out.
pub struct ResolutionContext {
    cfg: Config,
    loader: FactLoader,
}

impl ResolutionContext {
    pub fn new(cfg: Config) -> Self {
        let loader = FactLoader::new(&cfg);
        Self { cfg, loader }
    }

    /// Executes the pass:
    /// 1. **Facts**: every fact source, merged in order.
    /// 2. **Inventory**: parsed or executed, then overlaid with vars dirs.
    /// 3. **Resolution**: memberships and variables per host.
    /// 4. **Assembly**: records joined by host name, narrowed by the limit.
    pub async fn resolve(&self) -> Result<HostModel> {
        let facts: FactMap = info_span!("facts").in_scope(|| {
            self.loader
                .load_all(&self.cfg.fact_dirs, self.cfg.merge_policy)
        })?;
        info!("Loaded facts for {} hosts", facts.len());

        let graph: GroupGraph = self
            .load_inventory()
            .instrument(info_span!("inventory"))
            .await?;

        let mut model: HostModel = info_span!("resolve").in_scope(|| {
            let resolver = VariableResolver::new(&graph)?;
            Ok::<_, ResolveError>(builder::build(&resolver, facts))
        })?;

        if let Some(patterns) = &self.cfg.limit {
            let Ok(limit) = patterns.parse::<Limit>();
            limit.apply(&mut model);
            info!("{} hosts match limit '{patterns}'", model.len());
        }

        Ok(model)
    }

    async fn load_inventory(&self) -> Result<GroupGraph> {
        match &self.cfg.inventory {
            Some(path) => {
                let graph = inventory::load(path, self.cfg.dynamic_timeout).await?;
                info!(
                    "Inventory declares {} hosts in {} groups",
                    graph.hosts().len(),
                    graph.groups().count()
                );
                Ok(graph)
            }
            None => Ok(GroupGraph::new()),
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
