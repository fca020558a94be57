//! Whole-competition snapshots: import from a single JSON document and load back
//! from the JSONL files.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::jsonl::{EntityType, JsonlReader, JsonlWriter};
use super::{StorageConfig, StorageError};
use crate::calculate::CalculateError;
use crate::models::{CompId, Race, RaceNo, Raceday, RacedayId, TipsterReview};

/// Everything stored for one competition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSnapshot {
    #[serde(default)]
    pub racedays: Vec<Raceday>,
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub reviews: Vec<TipsterReview>,
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub racedays: usize,
    pub races: usize,
    pub reviews: usize,
}

fn check_race_no(race_no: RaceNo) -> Result<(), CalculateError> {
    if race_no == 0 {
        return Err(CalculateError::InvalidRaceNumber(race_no));
    }
    Ok(())
}

fn check_values<'a, I>(review: &TipsterReview, values: I) -> Result<(), CalculateError>
where
    I: IntoIterator<Item = (&'a RaceNo, &'a f64)>,
{
    for (&race_no, value) in values {
        check_race_no(race_no)?;
        if !value.is_finite() {
            return Err(CalculateError::NonFiniteValue {
                entity: review.tipster_id,
                race_no,
            });
        }
    }
    Ok(())
}

impl CompetitionSnapshot {
    /// Parse a snapshot from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Err(StorageError::PathNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Check race numbers, score values and tipster uniqueness per raceday.
    pub fn validate(&self) -> Result<(), CalculateError> {
        for race in &self.races {
            check_race_no(race.race_no)?;
        }

        let mut seen: HashSet<(RacedayId, _)> = HashSet::new();
        for review in &self.reviews {
            if !seen.insert((review.raceday_id, review.tipster_id)) {
                return Err(CalculateError::DuplicateEntity(review.tipster_id));
            }
            for &race_no in review.tips.keys() {
                check_race_no(race_no)?;
            }
            check_values(review, &review.points)?;
            check_values(review, &review.odds)?;
        }

        let known: HashSet<RacedayId> = self.racedays.iter().map(|r| r.id).collect();
        let orphans = self
            .races
            .iter()
            .map(|r| r.raceday_id)
            .chain(self.reviews.iter().map(|r| r.raceday_id))
            .filter(|id| !known.contains(id))
            .count();
        if orphans > 0 {
            warn!("{} races or reviews reference unknown racedays", orphans);
        }

        Ok(())
    }

    /// Validate and write the snapshot, replacing the competition's files.
    pub fn import(
        &self,
        config: &StorageConfig,
        comp_id: CompId,
    ) -> Result<ImportSummary, StorageError> {
        self.validate()?;

        let summary = ImportSummary {
            racedays: JsonlWriter::for_entity(config, EntityType::Raceday, comp_id)
                .write_all(&self.racedays)?,
            races: JsonlWriter::for_entity(config, EntityType::Race, comp_id)
                .write_all(&self.races)?,
            reviews: JsonlWriter::for_entity(config, EntityType::Review, comp_id)
                .write_all(&self.reviews)?,
        };

        info!(
            "Imported competition {}: {} racedays, {} races, {} reviews",
            comp_id, summary.racedays, summary.races, summary.reviews
        );
        Ok(summary)
    }

    /// Load a competition from its JSONL files.
    pub fn load(config: &StorageConfig, comp_id: CompId) -> Result<Self, StorageError> {
        let dir = config.comp_dir(comp_id);
        if !dir.exists() {
            return Err(StorageError::PathNotFound(dir));
        }

        Ok(Self {
            racedays: JsonlReader::for_entity(config, EntityType::Raceday, comp_id).read_all()?,
            races: JsonlReader::for_entity(config, EntityType::Race, comp_id).read_all()?,
            reviews: JsonlReader::for_entity(config, EntityType::Review, comp_id).read_all()?,
        })
    }

    pub fn raceday(&self, raceday_id: RacedayId) -> Option<&Raceday> {
        self.racedays.iter().find(|r| r.id == raceday_id)
    }

    /// Races of one raceday, in race-number order.
    pub fn races_for(&self, raceday_id: RacedayId) -> Vec<Race> {
        let mut races: Vec<Race> = self
            .races
            .iter()
            .filter(|r| r.raceday_id == raceday_id)
            .cloned()
            .collect();
        races.sort_by_key(|r| r.race_no);
        races
    }

    pub fn reviews_for(&self, raceday_id: RacedayId) -> Vec<TipsterReview> {
        self.reviews
            .iter()
            .filter(|r| r.raceday_id == raceday_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RaceDate, Tip, TipsterId};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn snapshot() -> CompetitionSnapshot {
        let day = RacedayId::new(5);
        CompetitionSnapshot {
            racedays: vec![Raceday::new(
                day,
                RaceDate::from_ymd(2025, 10, 25).unwrap(),
                "Cox Plate Day".to_string(),
            )],
            races: vec![Race::new(day, 2), Race::new(day, 1)],
            reviews: vec![TipsterReview::new(day, TipsterId::new(1), "Ann".to_string())
                .with_tip(1, Tip::main(3))
                .with_points(1, 2.0)],
        }
    }

    #[test]
    fn test_import_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let comp = CompId::new(3);

        let summary = snapshot().import(&config, comp).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                racedays: 1,
                races: 2,
                reviews: 1
            }
        );

        let loaded = CompetitionSnapshot::load(&config, comp).unwrap();
        assert_eq!(loaded, snapshot());

        let races: Vec<RaceNo> = loaded
            .races_for(RacedayId::new(5))
            .iter()
            .map(|r| r.race_no)
            .collect();
        assert_eq!(races, vec![1, 2]);
        assert_eq!(loaded.reviews_for(RacedayId::new(5)).len(), 1);
        assert!(loaded.raceday(RacedayId::new(6)).is_none());
    }

    #[test]
    fn test_load_unknown_comp() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        assert!(matches!(
            CompetitionSnapshot::load(&config, CompId::new(99)),
            Err(StorageError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_validate_rejects_race_zero() {
        let mut snap = snapshot();
        snap.races.push(Race::new(RacedayId::new(5), 0));

        assert_eq!(snap.validate(), Err(CalculateError::InvalidRaceNumber(0)));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut snap = snapshot();
        snap.reviews[0].odds.insert(1, f64::INFINITY);

        assert!(matches!(
            snap.validate(),
            Err(CalculateError::NonFiniteValue { race_no: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_tipster() {
        let mut snap = snapshot();
        let dup = snap.reviews[0].clone();
        snap.reviews.push(dup);

        assert_eq!(
            snap.validate(),
            Err(CalculateError::DuplicateEntity(TipsterId::new(1)))
        );
    }

    #[test]
    fn test_malformed_stored_date_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let comp = CompId::new(1);
        let dir = config.comp_dir(comp);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("racedays.jsonl"),
            "{\"id\":1,\"date\":\"2025-13-01\",\"name\":\"Bad\"}\n",
        )
        .unwrap();

        assert!(matches!(
            CompetitionSnapshot::load(&config, comp),
            Err(StorageError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{"racedays":[{"id":1,"date":"2025-10-25","name":"Derby Day"}]}"#,
        )
        .unwrap();

        let snap = CompetitionSnapshot::from_json_file(&path).unwrap();
        assert_eq!(snap.racedays.len(), 1);
        assert!(snap.races.is_empty());
        assert_eq!(snap.racedays[0].date.to_string(), "2025-10-25");
    }
}
