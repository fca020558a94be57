//! Racecard status: which races have results and which race jumps next.

use serde::Serialize;

use super::aggregate::{combinations_by_race, runner_consensus, RunnerConsensus};
use super::format::{format_place_odds, format_win_odds, ordinal};
use crate::models::{
    PlacedRunner, Race, RaceNo, RaceStatus, RunnerNo, SubTipCombination, TipsterReview,
};

/// Index of the first race without results, or `None` when the day is complete.
///
/// `races` must already be in race-number order.
pub fn next_to_jump_index(races: &[Race]) -> Option<usize> {
    races.iter().position(|race| !race.has_results())
}

/// Badge for the race at `index` given the next-to-jump index.
pub fn race_status(race: &Race, index: usize, next_to_jump: Option<usize>) -> RaceStatus {
    if race.has_results() {
        RaceStatus::Result
    } else if next_to_jump == Some(index) {
        RaceStatus::NextToJump
    } else {
        RaceStatus::Pending
    }
}

/// A substitution pair with runner names resolved from the racecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedSubstitution {
    pub main_runner_no: RunnerNo,
    pub main_runner_name: String,
    pub alt_runner_no: RunnerNo,
    pub alt_runner_name: String,
}

fn runner_label(race: &Race, runner_no: RunnerNo) -> String {
    race.runner_name(runner_no)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Runner {} N/A", runner_no))
}

/// Resolve runner names for each substitution pair.
pub fn name_substitutions<'a, I>(race: &Race, combos: I) -> Vec<NamedSubstitution>
where
    I: IntoIterator<Item = &'a SubTipCombination>,
{
    combos
        .into_iter()
        .map(|combo| NamedSubstitution {
            main_runner_no: combo.main,
            main_runner_name: runner_label(race, combo.main),
            alt_runner_no: combo.alt,
            alt_runner_name: runner_label(race, combo.alt),
        })
        .collect()
}

/// A placing from a finished race, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLine {
    /// `1st`, `2nd`, ...
    pub place: String,
    pub runner_no: RunnerNo,
    pub runner_name: String,
    /// Winner only, e.g. `$4.50`
    pub win_odds: String,
    /// First three places; `NTD` when no dividend was paid
    pub place_odds: String,
}

/// Result lines in finishing order.
pub fn result_lines(race: &Race) -> Vec<ResultLine> {
    let mut placed: Vec<&PlacedRunner> = race.results.iter().collect();
    placed.sort_by_key(|p| (p.position, p.runner_no));

    placed
        .into_iter()
        .map(|p| ResultLine {
            place: ordinal(p.position),
            runner_no: p.runner_no,
            runner_name: p.runner_name.clone(),
            win_odds: format_win_odds(p.position, p.win_odds),
            place_odds: format_place_odds(p.position, p.place_odds),
        })
        .collect()
}

/// One race as shown on the racecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSummary {
    pub race: Race,
    pub status: RaceStatus,
    /// Empty until the race has results
    pub results: Vec<ResultLine>,
    /// Present only for races still to run
    pub consensus: Option<RunnerConsensus>,
    pub substitutions: Vec<NamedSubstitution>,
}

/// The full racecard for a raceday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Racecard {
    pub races: Vec<RaceSummary>,
    /// Race number of the next race to jump; `None` once every race has results
    pub next_to_jump: Option<RaceNo>,
    pub day_complete: bool,
}

/// Build the racecard: sort races, find the next to jump, and attach consensus and
/// substitutions for races that have not been run.
pub fn build_racecard(races: &[Race], reviews: &[TipsterReview]) -> Racecard {
    let mut races: Vec<Race> = races.to_vec();
    races.sort_by_key(|r| r.race_no);

    let next = next_to_jump_index(&races);
    let combos = combinations_by_race(reviews);

    let summaries = races
        .iter()
        .enumerate()
        .map(|(index, race)| {
            let status = race_status(race, index, next);
            let (consensus, substitutions) = if race.has_results() {
                (None, Vec::new())
            } else {
                let tips = reviews.iter().filter_map(|r| r.tips.get(&race.race_no));
                let subs = combos
                    .get(&race.race_no)
                    .map(|set| name_substitutions(race, set))
                    .unwrap_or_default();
                (Some(runner_consensus(race, tips)), subs)
            };

            RaceSummary {
                race: race.clone(),
                status,
                results: result_lines(race),
                consensus,
                substitutions,
            }
        })
        .collect();

    Racecard {
        races: summaries,
        next_to_jump: next.map(|i| races[i].race_no),
        day_complete: next.is_none(),
    }
}
