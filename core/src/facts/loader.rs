use std::fs;
use std::path::{Path, PathBuf};

use hostmap_common::Vars;
use hostmap_common::config::Config;
use hostmap_common::error::{ResolveError, Result};
use hostmap_common::facts::MergePolicy;
use hostmap_protocols::DocumentError;
use hostmap_protocols::facts::{self, FactLayout};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use super::{FactMap, merge_into};

/// A fact file that decoded cleanly, not yet normalized.
struct RawFacts {
    host: String,
    path: PathBuf,
    raw: Vars,
}

/// Reads fact sources on a bounded rayon pool.
pub struct FactLoader {
    layout: Option<FactLayout>,
    strict: bool,
    pool: Option<ThreadPool>,
}

impl FactLoader {
    pub fn new(cfg: &Config) -> Self {
        Self {
            layout: cfg.fact_cache.map(FactLayout::from_flag),
            strict: cfg.strict_facts,
            pool: build_pool(cfg.fact_workers),
        }
    }

    /// Loads every source and merges them in declaration order.
    pub fn load_all(&self, sources: &[PathBuf], policy: MergePolicy) -> Result<FactMap> {
        let loaded: Vec<FactMap> = self.run(|| {
            sources
                .par_iter()
                .map(|source| self.load_source(source))
                .collect::<Result<Vec<FactMap>>>()
        })?;

        let mut merged = FactMap::new();
        for documents in loaded {
            merge_into(&mut merged, documents, policy);
        }
        Ok(merged)
    }

    /// Loads one source: a directory of per-host files, or a single file.
    pub fn load_source(&self, source: &Path) -> Result<FactMap> {
        let metadata = fs::metadata(source).map_err(|e| fact_source(source, e))?;
        let files: Vec<PathBuf> = if metadata.is_dir() {
            list_host_files(source)?
        } else {
            vec![source.to_path_buf()]
        };

        let decoded: Vec<RawFacts> = files
            .par_iter()
            .map(|path| self.read_file(path))
            .collect::<Result<Vec<Option<RawFacts>>>>()?
            .into_iter()
            .flatten()
            .collect();

        let layout: FactLayout = self
            .layout
            .unwrap_or_else(|| FactLayout::detect(decoded.iter().map(|file| &file.raw)));
        debug!(
            "Read {} fact file(s) from {} as {:?}",
            decoded.len(),
            source.display(),
            layout
        );

        let mut documents = FactMap::new();
        for RawFacts { host, path, raw } in decoded {
            match facts::normalize(raw, layout) {
                Ok(document) => {
                    documents.insert(host, document);
                }
                Err(e) => self.decode_failure(&path, e)?,
            }
        }
        Ok(documents)
    }

    fn read_file(&self, path: &Path) -> Result<Option<RawFacts>> {
        let host: String = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return Ok(None),
        };

        let bytes: Vec<u8> = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping unreadable fact file {}: {e}", path.display());
                return Ok(None);
            }
        };

        match facts::decode(&bytes) {
            Ok(raw) => Ok(Some(RawFacts {
                host,
                path: path.to_path_buf(),
                raw,
            })),
            Err(e) => {
                self.decode_failure(path, e)?;
                Ok(None)
            }
        }
    }

    fn decode_failure(&self, path: &Path, err: DocumentError) -> Result<()> {
        if self.strict {
            return Err(ResolveError::FactDecode {
                path: path.to_path_buf(),
                message: err.to_string(),
            });
        }
        warn!("Skipping undecodable fact file {}: {err}", path.display());
        Ok(())
    }

    fn run<T, F>(&self, op: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn build_pool(workers: usize) -> Option<ThreadPool> {
    if workers == 0 {
        return None;
    }
    match ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("hostmap-facts-{i}"))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!("Falling back to the global thread pool: {e}");
            None
        }
    }
}

/// Regular, non-hidden files of `dir`, sorted by name.
fn list_host_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| fact_source(dir, e))? {
        let path: PathBuf = entry.map_err(|e| fact_source(dir, e))?.path();
        let hidden: bool = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if !hidden && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn fact_source(path: &Path, source: std::io::Error) -> ResolveError {
    ResolveError::FactSource {
        path: path.to_path_buf(),
        source,
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
