//! Per-raceday tipster review records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{RaceNo, RacedayId, ScoredEntity, Tip, TipsterId};

/// Which per-race value a leaderboard ranks on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Points,
    Odds,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Points => write!(f, "points"),
            Metric::Odds => write!(f, "odds"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "points" => Ok(Metric::Points),
            "odds" => Ok(Metric::Odds),
            other => Err(format!("unknown metric '{}', use 'points' or 'odds'", other)),
        }
    }
}

/// Everything one tipster submitted and earned on one raceday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipsterReview {
    pub raceday_id: RacedayId,
    pub tipster_id: TipsterId,
    pub nickname: String,
    #[serde(default)]
    pub slogan: Option<String>,

    /// Selections keyed by race number
    #[serde(default)]
    pub tips: BTreeMap<RaceNo, Tip>,

    /// Points earned keyed by race number
    #[serde(default)]
    pub points: BTreeMap<RaceNo, f64>,

    /// Odds return earned keyed by race number
    #[serde(default)]
    pub odds: BTreeMap<RaceNo, f64>,
}

impl TipsterReview {
    pub fn new(raceday_id: RacedayId, tipster_id: TipsterId, nickname: String) -> Self {
        Self {
            raceday_id,
            tipster_id,
            nickname,
            slogan: None,
            tips: BTreeMap::new(),
            points: BTreeMap::new(),
            odds: BTreeMap::new(),
        }
    }

    pub fn with_tip(mut self, race_no: RaceNo, tip: Tip) -> Self {
        self.tips.insert(race_no, tip);
        self
    }

    pub fn with_points(mut self, race_no: RaceNo, points: f64) -> Self {
        self.points.insert(race_no, points);
        self
    }

    pub fn with_odds(mut self, race_no: RaceNo, odds: f64) -> Self {
        self.odds.insert(race_no, odds);
        self
    }

    /// Whether any selection was submitted.
    pub fn has_tipped(&self) -> bool {
        !self.tips.is_empty()
    }

    /// The per-race values for a metric.
    pub fn values(&self, metric: Metric) -> &BTreeMap<RaceNo, f64> {
        match metric {
            Metric::Points => &self.points,
            Metric::Odds => &self.odds,
        }
    }

    /// Project this review onto a scored entity for the given metric.
    pub fn scored_entity(&self, metric: Metric) -> ScoredEntity {
        let entity = ScoredEntity::new(self.tipster_id, self.nickname.clone())
            .with_values(self.values(metric).clone());
        match &self.slogan {
            Some(slogan) => entity.with_tagline(slogan.clone()),
            None => entity,
        }
    }
}
