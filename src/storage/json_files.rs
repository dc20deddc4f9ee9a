//! JSON file storage
//!
//! Layout inside the output directory:
//! - `_ranks.json`: the ranked list, pretty-printed
//! - `{handle}.json`: one compact record per user

use crate::model::{RankedUser, UserRecord};
use crate::storage::traits::{validate_key, Storage, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the ranked-list artifact
pub const RANKING_FILE: &str = "_ranks.json";

/// Storage writing JSON documents into a single directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    directory: PathBuf,
}

impl JsonFileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the ranked-list artifact
    pub fn ranking_path(&self) -> PathBuf {
        self.directory.join(RANKING_FILE)
    }

    /// Path of the record for `handle`
    pub fn user_path(&self, handle: &str) -> PathBuf {
        self.directory.join(format!("{}.json", handle))
    }
}

impl Storage for JsonFileStorage {
    fn prepare(&self) -> StorageResult<()> {
        if !self.directory.exists() {
            tracing::info!("Creating output directory {}", self.directory.display());
        }
        fs::create_dir_all(&self.directory)?;
        Ok(())
    }

    fn save_ranking(&self, users: &[RankedUser]) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(users)?;
        let path = self.ranking_path();
        fs::write(&path, json)?;
        tracing::debug!("Wrote {} ranked users to {}", users.len(), path.display());
        Ok(())
    }

    fn save_user(&self, handle: &str, record: &UserRecord) -> StorageResult<()> {
        validate_key(handle)?;

        let json = serde_json::to_string(record)?;
        let path = self.user_path(handle);
        fs::write(&path, json)?;
        tracing::trace!("Wrote {}", path.display());
        Ok(())
    }
}
