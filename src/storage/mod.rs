//! Filesystem storage for competition data.
//!
//! Each competition lives in its own directory of normalized JSONL files:
//! - `racedays.jsonl`
//! - `races.jsonl`
//! - `reviews.jsonl`

pub mod jsonl;
pub mod snapshot;

pub use jsonl::{list_comps, EntityType, JsonlReader, JsonlWriter};
pub use snapshot::{CompetitionSnapshot, ImportSummary};

use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::CalculateError;
use crate::models::CompId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse line {line} in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid data: {0}")]
    Invalid(#[from] CalculateError),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }

    /// Directory holding one competition's files.
    pub fn comp_dir(&self, comp_id: CompId) -> PathBuf {
        self.normalized_dir().join(comp_id.to_string())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.normalized_dir(), PathBuf::from("/data/normalized"));
        assert_eq!(
            config.comp_dir(CompId::new(7)),
            PathBuf::from("/data/normalized/7")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
