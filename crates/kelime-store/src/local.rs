//! Local single-blob progress store.
//!
//! Guest sessions persist the whole summary as one JSON document under a
//! well-known file name, written synchronously after every mutation.
//! There are no per-word documents; the blob carries everything a guest
//! session needs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use kelime_core::model::ProgressRecord;
use kelime_core::store::{ProgressStore, StoreError, WordChange};

/// File name of the progress blob inside the data directory.
pub const PROGRESS_FILE: &str = "progress.json";

/// Guest-session store backed by a single JSON file.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store rooted at `<data_dir>/progress.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PROGRESS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProgressStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn hydrate(&self) -> Result<ProgressRecord, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ProgressRecord::default()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn persist(
        &self,
        record: &ProgressRecord,
        _change: Option<&WordChange>,
    ) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}
