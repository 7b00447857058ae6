//! The central **abstraction** over inventory sources.
//!
//! Every source, whether a static INI file, a directory of them, or a
//! dynamic inventory program, has one capability: produce an unresolved
//! [`GroupGraph`]. Everything downstream of [`InventorySource::load`] is
//! source-agnostic.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::error::{ResolveError, Result};
use hostmap_common::inventory::GroupGraph;
use tracing::debug;

mod directory;
mod dynamic;
mod ini;
mod vars_dirs;

pub use directory::DirectoryInventory;
pub use dynamic::DynamicInventory;
pub use ini::StaticInventory;

#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Where the source was read from, for diagnostics.
    fn path(&self) -> &Path;

    async fn load(&self) -> Result<GroupGraph>;
}

/// Picks the source implementation for `path`.
///
/// Directories are read file by file, executables are run as dynamic
/// inventories (by permission bits, not extension), anything else is parsed
/// as an INI document.
pub fn open(path: &Path, timeout: Duration) -> Result<Box<dyn InventorySource>> {
    let metadata: Metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;

    let source: Box<dyn InventorySource> = if metadata.is_dir() {
        Box::new(DirectoryInventory::new(path, timeout))
    } else if is_executable(&metadata) {
        Box::new(DynamicInventory::new(path, timeout))
    } else {
        Box::new(StaticInventory::new(path))
    };
    Ok(source)
}

/// Loads the inventory at `path` and overlays its `group_vars/` and
/// `host_vars/` directories.
pub async fn load(path: &Path, timeout: Duration) -> Result<GroupGraph> {
    let source = open(path, timeout)?;
    debug!("Loading inventory from {}", source.path().display());

    let mut graph: GroupGraph = source.load().await?;
    vars_dirs::apply(&vars_root(path), &mut graph)?;
    Ok(graph)
}

/// The directory `host_vars/` and `group_vars/` are looked up in.
fn vars_root(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(unix)]
pub(crate) fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.is_file() && metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
pub(crate) fn is_executable(_metadata: &Metadata) -> bool {
    false
}

pub(crate) fn read_error(path: &Path, source: std::io::Error) -> ResolveError {
    ResolveError::InventoryRead {
        path: path.to_path_buf(),
        source,
    }
}
