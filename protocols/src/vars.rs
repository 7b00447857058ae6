//! `host_vars/` and `group_vars/` documents.

use hostmap_common::Vars;
use serde_json::Value;

use crate::error::DocumentError;

/// File extensions a vars document may carry. No extension is fine too.
pub const VARS_EXTENSIONS: &[&str] = &["yml", "yaml", "json"];

/// Parses a YAML (or JSON) vars document. An empty document is an empty mapping.
pub fn parse(text: &str) -> Result<Vars, DocumentError> {
    if is_blank(text) {
        return Ok(Vars::new());
    }

    match serde_yaml::from_str::<Value>(text)? {
        Value::Object(vars) => Ok(vars),
        Value::Null => Ok(Vars::new()),
        _ => Err(DocumentError::Shape(
            "vars document must be a mapping".into(),
        )),
    }
}

fn is_blank(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line == "---" || line == "..." || line.starts_with('#')
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
