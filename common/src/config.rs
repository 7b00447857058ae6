use std::path::PathBuf;
use std::time::Duration;

use crate::facts::MergePolicy;

pub const DEFAULT_DYNAMIC_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    /// Fact sources, lowest precedence first.
    pub fact_dirs: Vec<PathBuf>,
    /// Inventory file, directory or executable.
    pub inventory: Option<PathBuf>,
    /// Forces the fact-cache layout on (`Some(true)`) or off (`Some(false)`).
    ///
    /// `None` detects the layout per directory.
    pub fact_cache: Option<bool>,
    pub merge_policy: MergePolicy,
    /// Undecodable fact files abort the pass instead of being skipped.
    pub strict_facts: bool,
    /// Comma-separated host/group patterns, `!` excludes.
    pub limit: Option<String>,
    /// Upper bound on a dynamic inventory run.
    pub dynamic_timeout: Duration,
    /// Threads used to read fact files. `0` lets rayon decide.
    pub fact_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fact_dirs: Vec::new(),
            inventory: None,
            fact_cache: None,
            merge_policy: MergePolicy::Override,
            strict_facts: false,
            limit: None,
            dynamic_timeout: DEFAULT_DYNAMIC_TIMEOUT,
            fact_workers: 0,
        }
    }
}
