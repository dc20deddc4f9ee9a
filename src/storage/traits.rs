//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::model::{RankedUser, UserRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Every write targets its own slot (one ranking artifact, one record per
/// handle), so implementations are shared across concurrent tasks without
/// locking.
pub trait Storage: Send + Sync {
    /// Ensures the output location exists
    ///
    /// Called once before any write.
    fn prepare(&self) -> StorageResult<()>;

    /// Persists the full ranked list as one artifact
    fn save_ranking(&self, users: &[RankedUser]) -> StorageResult<()>;

    /// Persists one user's record under `handle`
    ///
    /// `handle` is the ranked name the record was harvested for.
    fn save_user(&self, handle: &str, record: &UserRecord) -> StorageResult<()>;
}

/// Checks that a handle can be used as a record key
///
/// Rejects empty keys, `.`/`..`, and anything containing a path separator or NUL.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
