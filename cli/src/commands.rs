pub mod resolve;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use hostmap_common::config::Config;
use hostmap_common::facts::MergePolicy;

#[derive(Parser)]
#[command(name = "hostmap")]
#[command(about = "Resolves Ansible inventories and gathered facts into one host model.")]
pub struct CommandLine {
    /// Fact directories or files, lowest precedence first
    #[arg(required = true, value_name = "FACT_DIRS")]
    pub fact_dirs: Vec<PathBuf>,

    /// Inventory file, directory or script
    #[arg(short, long, value_name = "PATH")]
    pub inventory: Option<PathBuf>,

    /// Treat fact dirs as fact-cache layout
    #[arg(short = 'f', long)]
    pub fact_cache: bool,

    /// Comma-separated host/group patterns, prefix with '!' to exclude
    #[arg(short, long, value_name = "PATTERNS")]
    pub limit: Option<String>,

    /// Merge fact sources recursively instead of replacing top-level keys
    #[arg(long)]
    pub deep_merge: bool,

    /// Fail on undecodable fact files instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Dynamic inventory timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Fact loading threads (default: CPU count)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Dump the resolved model as JSON
    #[arg(long)]
    pub json: bool,

    /// More output, repeat for more
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Less output, repeat for less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            fact_dirs: self.fact_dirs.clone(),
            inventory: self.inventory.clone(),
            fact_cache: self.fact_cache.then_some(true),
            merge_policy: if self.deep_merge {
                MergePolicy::Deep
            } else {
                MergePolicy::Override
            },
            strict_facts: self.strict,
            limit: self.limit.clone(),
            dynamic_timeout: Duration::from_secs(self.timeout),
            fact_workers: self.workers.unwrap_or(0),
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

    #[test]
    fn test_flags_map_to_config() {
        let cmd = CommandLine::try_parse_from([
            "hostmap",
            "-i",
            "hosts",
            "-f",
            "--deep-merge",
            "--timeout",
            "5",
            "-l",
            "web,!staging",
            "out/",
            "extend/",
        ])
        .unwrap();
        let cfg = cmd.config();

        assert_eq!(cfg.fact_dirs, vec![PathBuf::from("out/"), PathBuf::from("extend/")]);
        assert_eq!(cfg.inventory, Some(PathBuf::from("hosts")));
        assert_eq!(cfg.fact_cache, Some(true));
        assert_eq!(cfg.merge_policy, MergePolicy::Deep);
        assert_eq!(cfg.dynamic_timeout, Duration::from_secs(5));
        assert_eq!(cfg.limit.as_deref(), Some("web,!staging"));
    }

    #[test]
    fn test_defaults() {
        let cfg = CommandLine::try_parse_from(["hostmap", "out/"]).unwrap().config();
        assert_eq!(cfg.fact_cache, None);
        assert_eq!(cfg.merge_policy, MergePolicy::Override);
        assert_eq!(cfg.dynamic_timeout, Duration::from_secs(30));
        assert_eq!(cfg.fact_workers, 0);
        assert!(!cfg.strict_facts);
    }

    #[test]
    fn test_fact_dirs_are_required() {
        assert!(CommandLine::try_parse_from(["hostmap"]).is_err());
        assert!(CommandLine::try_parse_from(["hostmap", "-v", "-q", "out/"]).is_err());
    }
}
