//! Per-host fact files.
//!
//! Two on-disk layouts carry the same data:
//! * **Flat**: the output of `ansible -m setup --tree`, with the facts under
//!   an `ansible_facts` key and anything else (extension keys) next to it.
//! * **Fact cache**: Ansible's `jsonfile` cache, holding the facts mapping
//!   directly (`{"ansible_env": ..., "ansible_hostname": ...}`).

use hostmap_common::Vars;
use hostmap_common::facts::{FACTS_NAMESPACE, FactDocument};
use serde_json::Value;

use crate::error::DocumentError;

const FACT_PREFIX: &str = "ansible_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactLayout {
    Flat,
    FactCache,
}

impl FactLayout {
    pub fn from_flag(fact_cache: bool) -> Self {
        if fact_cache { Self::FactCache } else { Self::Flat }
    }

    /// Picks the layout of a directory from its decoded documents.
    ///
    /// Fact cache when no document has the namespace key and at least one
    /// carries `ansible_`-prefixed keys at the top. Extension-only documents
    /// (`{"software": [...]}`) therefore read as flat.
    pub fn detect<'a>(documents: impl IntoIterator<Item = &'a Vars>) -> Self {
        let mut cache_shaped: bool = false;
        for document in documents {
            if document.contains_key(FACTS_NAMESPACE) {
                return Self::Flat;
            }
            if document.keys().any(|key| key.starts_with(FACT_PREFIX)) {
                cache_shaped = true;
            }
        }
        if cache_shaped { Self::FactCache } else { Self::Flat }
    }
}

/// Decodes a fact file into its top-level mapping.
pub fn decode(bytes: &[u8]) -> Result<Vars, DocumentError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        other => Err(DocumentError::Shape(format!(
            "expected a JSON object, found {}",
            type_name(&other)
        ))),
    }
}

/// Brings a decoded file into the common document shape.
pub fn normalize(mut raw: Vars, layout: FactLayout) -> Result<FactDocument, DocumentError> {
    match layout {
        FactLayout::FactCache => Ok(FactDocument::new(raw, Vars::new())),
        FactLayout::Flat => {
            let facts: Vars = match raw.remove(FACTS_NAMESPACE) {
                None => Vars::new(),
                Some(Value::Object(facts)) => facts,
                Some(other) => {
                    return Err(DocumentError::Shape(format!(
                        "'{FACTS_NAMESPACE}' must be an object, found {}",
                        type_name(&other)
                    )));
                }
            };
            Ok(FactDocument::new(facts, raw))
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
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
