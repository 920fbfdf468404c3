//! Refined example persistence
//!
//! Stores human-validated few-shot examples as a pretty-printed JSON array.
//! Every append reads the whole collection, pushes one record, and rewrites
//! the file atomically (temp file + rename), so readers never see a partial
//! write. A missing file is an empty collection.
//!
//! Appends are serialized within the process. Two processes appending to the
//! same file still race (last writer wins).

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::types::RefinedExample;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store serialization error ({path}): {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed, append-only collection of refined examples
#[derive(Debug)]
pub struct RefinementStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RefinementStore {
    /// Point the store at `path`; the file is created on first append
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored example, oldest first
    pub fn load(&self) -> Result<Vec<RefinedExample>, StoreError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&data).map_err(|source| StoreError::Serialization {
            path: self.path.clone(),
            source,
        })
    }

    /// The `limit` most recent examples, oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<RefinedExample>, StoreError> {
        let mut examples = self.load()?;
        let skip = examples.len().saturating_sub(limit);
        examples.drain(..skip);
        Ok(examples)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Read-modify-write append. Returns the new collection size.
    pub async fn append(&self, example: RefinedExample) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut examples = self.load()?;
        examples.push(example);
        self.write_all(&examples)?;

        info!(
            path = %self.path.display(),
            total = examples.len(),
            "Refined example appended"
        );
        Ok(examples.len())
    }

    /// Replace the file contents atomically (write temp file, then rename).
    fn write_all(&self, examples: &[RefinedExample]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(examples).map_err(|source| {
            StoreError::Serialization {
                path: self.path.clone(),
                source,
            }
        })?;

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let written = std::fs::write(&tmp_path, &json)
            .and_then(|()| std::fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(io_err(e));
        }

        debug!(path = %self.path.display(), bytes = json.len(), "Refinement store written");
        Ok(())
    }
}
