use std::str::FromStr;

use hostmap_common::host::{HostModel, ResolvedHost};

/// Host/group patterns that narrow the resolved model.
///
/// `web,db01,!staging` keeps hosts named `db01` or in `web`, minus anything
/// in `staging`. A limit with only exclusions starts from every host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limit {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl Limit {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn matches(&self, host: &ResolvedHost) -> bool {
        let hit = |pattern: &String| host.name == *pattern || host.in_group(pattern);

        let included: bool = self.include.is_empty() || self.include.iter().any(hit);
        included && !self.exclude.iter().any(hit)
    }

    pub fn apply(&self, model: &mut HostModel) {
        if !self.is_empty() {
            model.retain(|_, host| self.matches(host));
        }
    }
}

impl FromStr for Limit {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut limit = Limit::default();
        for pattern in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match pattern.strip_prefix('!') {
                Some(excluded) => limit.exclude.push(excluded.trim().to_string()),
                None => limit.include.push(pattern.to_string()),
            }
        }
        Ok(limit)
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
