//! # Fact Documents
//!
//! A fact document is what one source knows about one host. The collected
//! facts live under the [`FACTS_NAMESPACE`] key; every other top-level key
//! (`software`, `changed`, ...) is an extension key kept next to them.

use serde_json::Value;

use crate::Vars;

pub const FACTS_NAMESPACE: &str = "ansible_facts";

/// How a later fact source is folded into an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Shared keys take the later value, inside the namespace and at the top level.
    #[default]
    Override,
    /// Mappings are merged recursively; later scalars and lists win.
    Deep,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactDocument {
    pub facts: Vars,
    pub extensions: Vars,
}

impl FactDocument {
    pub fn new(facts: Vars, extensions: Vars) -> Self {
        Self { facts, extensions }
    }

    /// Folds `later` into `self`.
    pub fn merge(&mut self, later: FactDocument, policy: MergePolicy) {
        match policy {
            MergePolicy::Override => {
                self.facts.extend(later.facts);
                self.extensions.extend(later.extensions);
            }
            MergePolicy::Deep => {
                deep_update(&mut self.facts, later.facts);
                deep_update(&mut self.extensions, later.extensions);
            }
        }
    }
}

/// Recursively merges `source` into `target`.
pub fn deep_update(target: &mut Vars, source: Vars) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_update(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> Vars {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_override_replaces_shared_keys() {
        let mut base = FactDocument::new(
            vars(json!({"ansible_env": {"EDITOR": "vim", "HOME": "/root"}, "ansible_os_family": "Debian"})),
            vars(json!({"changed": false})),
        );
        let extend = FactDocument::new(
            vars(json!({"ansible_env": {"EDITOR": "nano"}})),
            vars(json!({"software": ["Apache2"]})),
        );

        base.merge(extend, MergePolicy::Override);

        assert_eq!(base.facts["ansible_env"], json!({"EDITOR": "nano"}));
        assert_eq!(base.facts["ansible_os_family"], json!("Debian"));
        assert_eq!(base.extensions["software"], json!(["Apache2"]));
        assert_eq!(base.extensions["changed"], json!(false));
    }

    #[test]
    fn test_deep_keeps_nested_keys() {
        let mut base = FactDocument::new(
            vars(json!({"ansible_env": {"EDITOR": "vim", "HOME": "/root"}})),
            Vars::new(),
        );
        let extend = FactDocument::new(vars(json!({"ansible_env": {"EDITOR": "nano"}})), Vars::new());

        base.merge(extend, MergePolicy::Deep);

        assert_eq!(
            base.facts["ansible_env"],
            json!({"EDITOR": "nano", "HOME": "/root"})
        );
    }

    #[test]
    fn test_deep_update_replaces_non_objects() {
        let mut target = vars(json!({"a": [1, 2], "b": {"c": 1}}));
        deep_update(&mut target, vars(json!({"a": [3], "b": 5})));
        assert_eq!(Value::Object(target), json!({"a": [3], "b": 5}));
    }
}
