use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::error::Result;
use hostmap_common::inventory::GroupGraph;
use tracing::debug;

use super::{DynamicInventory, InventorySource, StaticInventory, is_executable, read_error};

const IGNORED_SUFFIXES: &[&str] = &["~", ".orig", ".bak", ".retry", ".pyc", ".pyo"];
const UNSUPPORTED_EXTENSIONS: &[&str] = &["yml", "yaml", "json", "md"];

/// A directory of inventory documents, merged in file-name order.
///
/// Executables inside the directory are run as dynamic inventories. The
/// directory is not descended into, so `host_vars/` and `group_vars/` are
/// left to the vars loader.
pub struct DirectoryInventory {
    path: PathBuf,
    timeout: Duration,
}

impl DirectoryInventory {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    fn documents(&self) -> Result<Vec<PathBuf>> {
        let mut documents: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(|e| read_error(&self.path, e))? {
            let path: PathBuf = entry.map_err(|e| read_error(&self.path, e))?.path();
            if !path.is_file() {
                continue;
            }
            if is_ignored(&path) {
                debug!("Ignoring {} in inventory directory", path.display());
                continue;
            }
            documents.push(path);
        }
        documents.sort();
        Ok(documents)
    }
}

#[async_trait]
impl InventorySource for DirectoryInventory {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<GroupGraph> {
        let mut graph = GroupGraph::new();

        for document in self.documents()? {
            let metadata = fs::metadata(&document).map_err(|e| read_error(&document, e))?;
            let source: Box<dyn InventorySource> = if is_executable(&metadata) {
                Box::new(DynamicInventory::new(&document, self.timeout))
            } else {
                Box::new(StaticInventory::new(&document))
            };

            debug!("Reading inventory document {}", document.display());
            graph.merge(source.load().await?);
        }

        Ok(graph)
    }
}

fn is_ignored(path: &Path) -> bool {
    let name: String = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return true,
    };
    if name.starts_with('.') || IGNORED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return true;
    }
    path.extension()
        .is_some_and(|ext| UNSUPPORTED_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
