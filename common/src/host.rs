use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Vars;
use crate::facts::{FACTS_NAMESPACE, FactDocument};

/// Resolved hosts keyed by name.
pub type HostModel = BTreeMap<String, ResolvedHost>;

/// The final per-host record handed to reporting layers.
///
/// Serializes as one flat object: `name`, `ansible_facts`, `hostvars`,
/// `groups`, then every extension key of the merged fact document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedHost {
    pub name: String,
    #[serde(rename = "ansible_facts", default)]
    pub facts: Vars,
    #[serde(default)]
    pub hostvars: Vars,
    #[serde(default)]
    pub groups: BTreeSet<String>,
    #[serde(flatten)]
    pub extensions: Vars,
}

impl ResolvedHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_facts(mut self, document: FactDocument) -> Self {
        self.facts = document.facts;
        self.extensions = document.extensions;
        self
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Looks up a top-level key the way the serialized record exposes it.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::String(self.name.clone())),
            FACTS_NAMESPACE => Some(Value::Object(self.facts.clone())),
            "hostvars" => Some(Value::Object(self.hostvars.clone())),
            "groups" => Some(Value::Array(
                self.groups.iter().cloned().map(Value::String).collect(),
            )),
            _ => self.extensions.get(key).cloned(),
        }
    }
}

impl From<&str> for ResolvedHost {
    fn from(name: &str) -> Self {
        Self::new(name)
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
