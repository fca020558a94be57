//! Per-tipster totals, tip consensus and substitution combinations.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::models::{Race, RaceNo, RunnerNo, SubTipCombination, Tip, TipsterReview};

/// Total of a tipster's per-race values and whether they took part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub total: f64,
    pub has_participated: bool,
}

/// Sum the values present in the map. An empty map is a non-participant with total 0.
///
/// Participation depends only on the map having an entry, never on the value, so a
/// single race scoring 0 still counts as participating.
pub fn aggregate(per_race_values: &BTreeMap<RaceNo, f64>) -> Aggregate {
    Aggregate {
        total: per_race_values.values().fold(0.0, |acc, v| acc + v),
        has_participated: !per_race_values.is_empty(),
    }
}

/// Distinct (main, substitute) pairs among the tips. Tips without a substitute are skipped.
pub fn extract_unique_combinations<'a, I>(tips: I) -> BTreeSet<SubTipCombination>
where
    I: IntoIterator<Item = &'a Tip>,
{
    tips.into_iter().filter_map(Tip::combination).collect()
}

/// Distinct substitution pairs per race across every tipster's review.
pub fn combinations_by_race<'a, I>(reviews: I) -> BTreeMap<RaceNo, BTreeSet<SubTipCombination>>
where
    I: IntoIterator<Item = &'a TipsterReview>,
{
    let mut by_race: BTreeMap<RaceNo, BTreeSet<SubTipCombination>> = BTreeMap::new();

    for review in reviews {
        for (race_no, tip) in &review.tips {
            if let Some(combo) = tip.combination() {
                by_race.entry(*race_no).or_default().insert(combo);
            }
        }
    }

    by_race
}

/// How many tipsters are on one runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerVotes {
    pub runner_no: RunnerNo,
    pub runner_name: String,
    pub tipster_count: u32,
}

/// Tipster market consensus for one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerConsensus {
    pub race_no: RaceNo,
    /// Runners ordered by votes (descending), then runner number
    pub runners: Vec<RunnerVotes>,
    /// Highest vote count, for scaling bars
    pub max_count: u32,
}

/// Count votes per runner for a race. Each tip votes for its substitute when present,
/// otherwise for its main selection. Runners nobody picked are listed with 0.
pub fn runner_consensus<'a, I>(race: &Race, tips: I) -> RunnerConsensus
where
    I: IntoIterator<Item = &'a Tip>,
{
    let mut counts: HashMap<RunnerNo, u32> = HashMap::new();
    for tip in tips {
        *counts.entry(tip.counted_runner()).or_insert(0) += 1;
    }

    let mut runners: Vec<RunnerVotes> = race
        .runners
        .iter()
        .map(|r| RunnerVotes {
            runner_no: r.runner_no,
            runner_name: r.name.clone(),
            tipster_count: counts.get(&r.runner_no).copied().unwrap_or(0),
        })
        .collect();

    runners.sort_by(|a, b| {
        b.tipster_count
            .cmp(&a.tipster_count)
            .then_with(|| a.runner_no.cmp(&b.runner_no))
    });

    let max_count = runners.iter().map(|r| r.tipster_count).max().unwrap_or(0);

    RunnerConsensus {
        race_no: race.race_no,
        runners,
        max_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RacedayId, Runner, TipsterId};
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(RaceNo, f64)]) -> BTreeMap<RaceNo, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_aggregate_sums_present_values() {
        let agg = aggregate(&values(&[(1, 3.0), (4, 1.0), (6, 2.0)]));
        assert_eq!(agg.total, 6.0);
        assert!(agg.has_participated);
    }

    #[test]
    fn test_aggregate_empty_map() {
        let agg = aggregate(&BTreeMap::new());
        assert_eq!(agg.total, 0.0);
        assert!(!agg.has_participated);
    }

    #[test]
    fn test_aggregate_zero_score_still_participates() {
        let agg = aggregate(&values(&[(2, 0.0)]));
        assert_eq!(agg.total, 0.0);
        assert!(agg.has_participated);
    }

    #[test]
    fn test_aggregate_negative_odds_return() {
        let agg = aggregate(&values(&[(1, -10.0), (2, 4.5)]));
        assert_eq!(agg.total, -5.5);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let map = values(&[(1, 1.25), (2, 2.5)]);
        let first = aggregate(&map);
        let second = aggregate(&map);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_unique_combinations() {
        let tips = vec![
            Tip::with_alt(5, 2),
            Tip::with_alt(5, 2),
            Tip::with_alt(2, 5),
            Tip::main(7),
        ];

        let combos = extract_unique_combinations(&tips);

        let expected: BTreeSet<SubTipCombination> = [
            SubTipCombination { main: 5, alt: 2 },
            SubTipCombination { main: 2, alt: 5 },
        ]
        .into_iter()
        .collect();
        assert_eq!(combos, expected);
    }

    #[test]
    fn test_extract_unique_combinations_empty() {
        let tips = vec![Tip::main(1), Tip::main(2)];
        assert!(extract_unique_combinations(&tips).is_empty());
    }

    #[test]
    fn test_combinations_by_race() {
        let raceday = RacedayId::new(1);
        let reviews = vec![
            TipsterReview::new(raceday, TipsterId::new(1), "A".to_string())
                .with_tip(1, Tip::with_alt(5, 2))
                .with_tip(2, Tip::main(3)),
            TipsterReview::new(raceday, TipsterId::new(2), "B".to_string())
                .with_tip(1, Tip::with_alt(5, 2))
                .with_tip(2, Tip::with_alt(3, 8)),
        ];

        let by_race = combinations_by_race(&reviews);

        assert_eq!(by_race.len(), 2);
        assert_eq!(by_race[&1].len(), 1);
        assert!(by_race[&2].contains(&SubTipCombination { main: 3, alt: 8 }));
    }

    #[test]
    fn test_runner_consensus_counts_alt_over_main() {
        let race = Race::new(RacedayId::new(1), 3).with_runners(vec![
            Runner::new(1, "One".to_string()),
            Runner::new(2, "Two".to_string()),
            Runner::new(5, "Five".to_string()),
        ]);
        let tips = vec![
            Tip::with_alt(5, 2),
            Tip::main(5),
            Tip::main(2),
            Tip::main(2),
        ];

        let consensus = runner_consensus(&race, &tips);

        assert_eq!(consensus.race_no, 3);
        assert_eq!(consensus.max_count, 3);
        let order: Vec<(RunnerNo, u32)> = consensus
            .runners
            .iter()
            .map(|r| (r.runner_no, r.tipster_count))
            .collect();
        assert_eq!(order, vec![(2, 3), (5, 1), (1, 0)]);
    }

    #[test]
    fn test_runner_consensus_no_tips() {
        let race = Race::new(RacedayId::new(1), 1).with_runners(vec![
            Runner::new(2, "Two".to_string()),
            Runner::new(1, "One".to_string()),
        ]);

        let consensus = runner_consensus(&race, std::iter::empty());

        assert_eq!(consensus.max_count, 0);
        assert_eq!(consensus.runners[0].runner_no, 1);
        assert_eq!(consensus.runners[1].runner_no, 2);
    }
}
