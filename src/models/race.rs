//! Races, runners and results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RaceNo, RacedayId, RunnerNo};

/// A runner on the racecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    pub runner_no: RunnerNo,
    pub name: String,
    #[serde(default)]
    pub barrier: Option<u32>,
    #[serde(default)]
    pub jockey: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
}

impl Runner {
    pub fn new(runner_no: RunnerNo, name: String) -> Self {
        Self {
            runner_no,
            name,
            barrier: None,
            jockey: None,
            weight: None,
            form: None,
        }
    }

    /// The last five starts of the form line.
    pub fn recent_form(&self) -> &str {
        match self.form.as_deref() {
            Some(form) => {
                let skip = form.chars().count().saturating_sub(5);
                match form.char_indices().nth(skip) {
                    Some((idx, _)) => &form[idx..],
                    None => "",
                }
            }
            None => "",
        }
    }
}

/// A runner that finished in a paying position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRunner {
    pub runner_no: RunnerNo,
    pub position: u32,
    #[serde(default)]
    pub runner_name: String,
    /// Win dividend
    #[serde(default)]
    pub win_odds: Option<f64>,
    /// Place dividend; 0.00 means no third dividend
    #[serde(default)]
    pub place_odds: Option<f64>,
}

/// One race on a raceday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub raceday_id: RacedayId,
    pub race_no: RaceNo,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub runners: Vec<Runner>,
    #[serde(default)]
    pub results: Vec<PlacedRunner>,
}

impl Race {
    pub fn new(raceday_id: RacedayId, race_no: RaceNo) -> Self {
        Self {
            raceday_id,
            race_no,
            notes: String::new(),
            runners: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn with_runners(mut self, runners: Vec<Runner>) -> Self {
        self.runners = runners;
        self
    }

    pub fn with_results(mut self, results: Vec<PlacedRunner>) -> Self {
        self.results = results;
        self
    }

    /// Whether results have been entered for this race.
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Look up a runner's name by number.
    pub fn runner_name(&self, runner_no: RunnerNo) -> Option<&str> {
        self.runners
            .iter()
            .find(|r| r.runner_no == runner_no)
            .map(|r| r.name.as_str())
    }
}

/// Racecard badge for a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceStatus {
    #[serde(rename = "RESULT")]
    Result,
    #[serde(rename = "NEXT TO JUMP")]
    NextToJump,
    #[serde(rename = "PENDING")]
    Pending,
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceStatus::Result => write!(f, "RESULT"),
            RaceStatus::NextToJump => write!(f, "NEXT TO JUMP"),
            RaceStatus::Pending => write!(f, "PENDING"),
        }
    }
}
