use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a resolution pass.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Malformed inventory document, with the line it was found on.
    /// Line `0` points at the document as a whole.
    #[error("{}:{line}: {message}", path.display())]
    InventorySyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("cannot read inventory {}: {source}", path.display())]
    InventoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The children graph is not a DAG. `cycle` starts and ends on the same group.
    #[error("group cycle detected: {}", cycle.join(" -> "))]
    GroupCycle { cycle: Vec<String> },

    #[error("dynamic inventory {} failed: {reason}", path.display())]
    DynamicInventoryExecution { path: PathBuf, reason: String },

    #[error("cannot read fact source {}: {source}", path.display())]
    FactSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode facts in {}: {message}", path.display())]
    FactDecode { path: PathBuf, message: String },
}

impl ResolveError {
    pub fn syntax(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::InventorySyntax {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn execution(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DynamicInventoryExecution {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
