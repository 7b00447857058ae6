use colored::*;
use hostmap_common::host::ResolvedHost;
use hostmap_common::inventory::ALL_GROUP;
use serde_json::Value;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Facts worth a line in the host tree, in display order.
const HEADLINE_FACTS: &[(&str, &[&str])] = &[
    ("FQDN", &["ansible_fqdn"]),
    ("OS", &["ansible_distribution"]),
    ("Release", &["ansible_distribution_version"]),
    ("IPv4", &["ansible_default_ipv4", "address"]),
    ("Memory", &["ansible_memtotal_mb"]),
];

pub fn host_details(host: &ResolvedHost) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![groups_to_detail(host)];

    for (label, path) in HEADLINE_FACTS {
        if let Some(value) = lookup(host, path) {
            details.push((label.to_string(), value.normal()));
        }
    }

    details.push(count_to_detail("Facts", host.facts.len()));
    details.push(count_to_detail("Vars", host.hostvars.len()));
    if !host.extensions.is_empty() {
        let keys: String = host.extensions.keys().cloned().collect::<Vec<_>>().join(", ");
        details.push(("Extra".to_string(), keys.color(colors::FACT)));
    }
    details
}

fn groups_to_detail(host: &ResolvedHost) -> Detail {
    let groups: Vec<&str> = host
        .groups
        .iter()
        .map(String::as_str)
        .filter(|group| *group != ALL_GROUP)
        .collect();
    let value: ColoredString = if groups.is_empty() {
        ALL_GROUP.color(colors::MISSING)
    } else {
        groups.join(", ").color(colors::GROUP)
    };
    ("Groups".to_string(), value)
}

fn count_to_detail(label: &str, count: usize) -> Detail {
    let value: ColoredString = if count == 0 {
        "none".color(colors::MISSING)
    } else {
        count.to_string().color(colors::ACCENT)
    };
    (label.to_string(), value)
}

/// Follows `path` into the namespaced facts and renders scalars.
fn lookup(host: &ResolvedHost, path: &[&str]) -> Option<String> {
    let (first, rest) = path.split_first()?;
    let mut value: &Value = host.facts.get(*first)?;
    for key in rest {
        value = value.get(*key)?;
    }
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
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
