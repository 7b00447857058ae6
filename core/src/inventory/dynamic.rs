//! Dynamic inventories: programs that print their inventory as JSON.
//!
//! The program is run once, with `--list`, and must exit successfully within
//! the configured timeout. It is killed when the timeout elapses.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::error::{ResolveError, Result};
use hostmap_common::inventory::GroupGraph;
use hostmap_protocols::dyninv;
use tokio::process::Command;
use tracing::{debug, info};

use super::InventorySource;

const LIST_ARG: &str = "--list";
const STDERR_LINES: usize = 5;

pub struct DynamicInventory {
    path: PathBuf,
    timeout: Duration,
}

impl DynamicInventory {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl InventorySource for DynamicInventory {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<GroupGraph> {
        let stdout: Vec<u8> = execute(&self.path, self.timeout).await?;
        dyninv::parse(&stdout)
            .map_err(|e| ResolveError::execution(&self.path, format!("unexpected output: {e}")))
    }
}

/// Runs the program and returns its standard output.
pub async fn execute(path: &Path, timeout: Duration) -> Result<Vec<u8>> {
    info!("Running dynamic inventory {}", path.display());

    let child = Command::new(program_path(path))
        .arg(LIST_ARG)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ResolveError::execution(path, format!("cannot start: {e}")))?;

    let output: Output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| ResolveError::execution(path, e.to_string()))?,
        Err(_) => {
            return Err(ResolveError::execution(
                path,
                format!("timed out after {:.1}s", timeout.as_secs_f64()),
            ));
        }
    };

    if !output.status.success() {
        return Err(ResolveError::execution(
            path,
            format!("{}{}", output.status, stderr_excerpt(&output.stderr)),
        ));
    }

    debug!("{} wrote {} bytes", path.display(), output.stdout.len());
    Ok(output.stdout)
}

/// A bare file name would be looked up on `PATH`; anchor it to the working directory.
fn program_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.components().count() > 1 {
        path.to_path_buf()
    } else {
        Path::new(".").join(path)
    }
}

fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(STDERR_LINES)
        .collect();
    if lines.is_empty() {
        String::new()
    } else {
        format!(": {}", lines.join(" | "))
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
