//! Scored and ranked tipster models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{RaceNo, TipsterId};

/// A tipster with one score per race they scored in.
///
/// Races absent from `per_race_values` were not scored; they are not zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    /// Tipster identifier
    pub id: TipsterId,

    /// Nickname shown on leaderboards
    pub display_name: String,

    /// Optional slogan
    #[serde(default)]
    pub tagline: Option<String>,

    /// Race number to points or odds return for that race
    #[serde(default)]
    pub per_race_values: BTreeMap<RaceNo, f64>,
}

impl ScoredEntity {
    /// Create a new ScoredEntity with no scores.
    pub fn new(id: TipsterId, display_name: String) -> Self {
        Self {
            id,
            display_name,
            tagline: None,
            per_race_values: BTreeMap::new(),
        }
    }

    /// Builder method to set the tagline.
    pub fn with_tagline(mut self, tagline: String) -> Self {
        self.tagline = Some(tagline);
        self
    }

    /// Builder method to record a score for one race.
    pub fn with_value(mut self, race_no: RaceNo, value: f64) -> Self {
        self.per_race_values.insert(race_no, value);
        self
    }

    /// Builder method to replace every per-race score.
    pub fn with_values(mut self, values: BTreeMap<RaceNo, f64>) -> Self {
        self.per_race_values = values;
        self
    }
}

/// A scored tipster with its computed total and dense rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    #[serde(flatten)]
    pub entity: ScoredEntity,

    /// Sum of the per-race values
    pub total: f64,

    /// Whether the tipster submitted anything
    pub has_participated: bool,

    /// Dense rank, starting at 1
    pub rank: u32,
}
