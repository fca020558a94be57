//! Raceday status and date windows relative to an explicit reference date.
//!
//! Nothing here reads the clock. Callers resolve "today" once and pass it in.

use serde::{Deserialize, Serialize};

use crate::models::{ClassifiedRaceday, RaceDate, Raceday, RacedayStatus};

/// Anything that falls on a calendar day.
pub trait Dated {
    fn race_date(&self) -> RaceDate;
}

impl Dated for RaceDate {
    fn race_date(&self) -> RaceDate {
        *self
    }
}

impl Dated for Raceday {
    fn race_date(&self) -> RaceDate {
        self.date
    }
}

impl Dated for ClassifiedRaceday {
    fn race_date(&self) -> RaceDate {
        self.raceday.date
    }
}

/// Days from `date` to `reference`. Positive when `date` is in the past.
pub fn day_offset(date: RaceDate, reference: RaceDate) -> i64 {
    date.days_until(reference)
}

/// Status of a single date relative to the reference date.
pub fn classify(date: RaceDate, reference: RaceDate) -> RacedayStatus {
    match day_offset(date, reference) {
        0 => RacedayStatus::Today,
        1 => RacedayStatus::Yesterday,
        d if d > 1 => RacedayStatus::Past,
        _ => RacedayStatus::Upcoming,
    }
}

/// Inclusive window around the reference date, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Days before the reference date still included (1 = yesterday)
    pub days_back: u32,
    /// Days after the reference date included
    pub days_ahead: u32,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self::LIVE
    }
}

impl WindowSpec {
    /// Yesterday through three days ahead.
    pub const LIVE: WindowSpec = WindowSpec {
        days_back: 1,
        days_ahead: 3,
    };

    pub fn new(days_back: u32, days_ahead: u32) -> Self {
        Self {
            days_back,
            days_ahead,
        }
    }

    /// Whether a day offset (as returned by [`day_offset`]) falls inside the window.
    pub fn contains_offset(&self, offset: i64) -> bool {
        -(self.days_ahead as i64) <= offset && offset <= self.days_back as i64
    }
}

/// Events inside the window, soonest first. Events on the same day keep input order.
pub fn filter_window<T: Dated + Clone>(
    events: &[T],
    reference: RaceDate,
    spec: WindowSpec,
) -> Vec<T> {
    let mut live: Vec<T> = events
        .iter()
        .filter(|e| spec.contains_offset(day_offset(e.race_date(), reference)))
        .cloned()
        .collect();

    live.sort_by_key(|e| e.race_date());
    live
}

/// Events strictly before yesterday, most recent first. Events on the same day keep
/// input order.
pub fn filter_and_sort_past<T: Dated + Clone>(events: &[T], reference: RaceDate) -> Vec<T> {
    let mut past: Vec<T> = events
        .iter()
        .filter(|e| day_offset(e.race_date(), reference) > 1)
        .cloned()
        .collect();

    past.sort_by(|a, b| b.race_date().cmp(&a.race_date()));
    past
}

/// Attach a status to every raceday, keeping input order.
pub fn classify_all(racedays: &[Raceday], reference: RaceDate) -> Vec<ClassifiedRaceday> {
    racedays
        .iter()
        .map(|raceday| ClassifiedRaceday {
            raceday: raceday.clone(),
            status: classify(raceday.date, reference),
        })
        .collect()
}
