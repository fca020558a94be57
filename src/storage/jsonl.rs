//! JSONL (JSON Lines) storage.
//!
//! JSONL is the source of truth for competition data.
//! Each line is a valid JSON object representing one entity.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{StorageConfig, StorageError};
use crate::models::CompId;

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Raceday,
    Race,
    Review,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Raceday => "racedays.jsonl",
            EntityType::Race => "races.jsonl",
            EntityType::Review => "reviews.jsonl",
        }
    }
}

/// Get the path for a competition's entity file.
pub fn entity_path(config: &StorageConfig, entity: EntityType, comp_id: CompId) -> PathBuf {
    config.comp_dir(comp_id).join(entity.filename())
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a specific entity type and competition.
    pub fn for_entity(config: &StorageConfig, entity: EntityType, comp_id: CompId) -> Self {
        Self::new(entity_path(config, entity, comp_id))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let count = Self::write_lines(BufWriter::new(file), entities)?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }

    fn write_lines(mut writer: BufWriter<File>, entities: &[T]) -> Result<usize, StorageError> {
        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
        }
        writer.flush()?;
        Ok(entities.len())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type and competition.
    pub fn for_entity(config: &StorageConfig, entity: EntityType, comp_id: CompId) -> Self {
        Self::new(entity_path(config, entity, comp_id))
    }

    /// Read all entities from the file. A missing file reads as empty; a line that
    /// does not parse fails the whole read.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let entity = serde_json::from_str(&line).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                line: idx + 1,
                source,
            })?;
            entities.push(entity);
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Find all competitions with stored data, in id order.
pub fn list_comps(config: &StorageConfig) -> Result<Vec<CompId>, StorageError> {
    let dir = config.normalized_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut comps = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<i64>().ok())
            {
                comps.push(CompId::new(id));
            }
        }
    }

    comps.sort();
    Ok(comps)
}
