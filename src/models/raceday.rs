//! Raceday model and calendar-day dates.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::RacedayId;
use crate::calculate::CalculateError;

fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("date pattern is a valid regex")
    })
}

/// A calendar day with no time or timezone component.
///
/// Built only from explicit year/month/day integers. `"YYYY-MM-DD"` strings are split into
/// their components first, so there is no UTC offset that could move the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RaceDate(NaiveDate);

impl RaceDate {
    /// Build a date from its components, failing on out-of-range months or days.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CalculateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CalculateError::InvalidDate {
                input: format!("{:04}-{:02}-{:02}", year, month, day),
                reason: "month or day out of range".to_string(),
            })
    }

    /// Parse a `YYYY-MM-DD` string component-wise.
    pub fn parse(input: &str) -> Result<Self, CalculateError> {
        let invalid = |reason: &str| CalculateError::InvalidDate {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let caps = date_shape()
            .captures(input)
            .ok_or_else(|| invalid("expected YYYY-MM-DD"))?;

        let year: i32 = caps[1].parse().map_err(|_| invalid("bad year"))?;
        let month: u32 = caps[2].parse().map_err(|_| invalid("bad month"))?;
        let day: u32 = caps[3].parse().map_err(|_| invalid("bad day"))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| invalid("month or day out of range"))
    }

    /// The underlying chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Whole days from `self` forward to `later` (negative if `later` is earlier).
    pub fn days_until(&self, later: RaceDate) -> i64 {
        (later.0 - self.0).num_days()
    }
}

impl From<NaiveDate> for RaceDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for RaceDate {
    type Err = CalculateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RaceDate {
    type Error = CalculateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RaceDate> for String {
    fn from(date: RaceDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for RaceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

/// Status of a raceday relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RacedayStatus {
    Today,
    Yesterday,
    Upcoming,
    Past,
}

impl fmt::Display for RacedayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RacedayStatus::Today => write!(f, "TODAY"),
            RacedayStatus::Yesterday => write!(f, "YESTERDAY"),
            RacedayStatus::Upcoming => write!(f, "UPCOMING"),
            RacedayStatus::Past => write!(f, "PAST"),
        }
    }
}

/// A raceday attached to a competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raceday {
    /// Competition raceday identifier
    pub id: RacedayId,

    /// Racing date
    pub date: RaceDate,

    /// Raceday name (e.g. "Cox Plate Day")
    pub name: String,

    /// Racetrack name
    #[serde(default)]
    pub track_name: String,

    /// Short racetrack code shown on cards
    #[serde(default)]
    pub track_locref: String,

    /// Number of races on the card
    #[serde(default)]
    pub race_count: u32,
}

impl Raceday {
    /// Create a new Raceday with an empty track.
    pub fn new(id: RacedayId, date: RaceDate, name: String) -> Self {
        Self {
            id,
            date,
            name,
            track_name: String::new(),
            track_locref: String::new(),
            race_count: 0,
        }
    }

    /// Builder method to set the racetrack.
    pub fn with_track(mut self, name: String, locref: String) -> Self {
        self.track_name = name;
        self.track_locref = locref;
        self
    }

    /// Builder method to set the race count.
    pub fn with_race_count(mut self, count: u32) -> Self {
        self.race_count = count;
        self
    }
}

/// A raceday together with its computed status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRaceday {
    #[serde(flatten)]
    pub raceday: Raceday,
    pub status: RacedayStatus,
}
