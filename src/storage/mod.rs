//! Storage module for persisting harvest output
//!
//! Storage is a collaborator of the harvester: it receives the ranked list
//! once and each user record as soon as that user completes.

mod json_files;
mod traits;

pub use json_files::{JsonFileStorage, RANKING_FILE};
pub use traits::{validate_key, Storage, StorageError, StorageResult};
