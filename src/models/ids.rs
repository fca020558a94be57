//! Integer entity identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque integer identifier, unique within its competition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Create a new EntityId.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Type alias for tipster IDs
pub type TipsterId = EntityId;

/// Type alias for competition raceday IDs
pub type RacedayId = EntityId;

/// Type alias for competition IDs
pub type CompId = EntityId;

/// Race number within a raceday. Always positive.
pub type RaceNo = u32;

/// Saddlecloth number of a runner within a race.
pub type RunnerNo = u32;
