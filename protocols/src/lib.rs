//! Document formats the engine reads.
//!
//! * [`ini`]: tokens and value literals of the INI inventory format.
//! * [`dyninv`]: the JSON contract of dynamic inventory programs.
//! * [`facts`]: per-host fact files, flat and fact-cache layouts.
//! * [`vars`]: `host_vars/` and `group_vars/` YAML documents.

pub mod dyninv;
pub mod error;
pub mod facts;
pub mod ini;
pub mod vars;

pub use error::DocumentError;
