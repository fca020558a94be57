//! Dense leaderboard ranking.
//!
//! Tipsters are sorted by their total (descending) with a collated name tie-break
//! (Unicode Collation Algorithm, so `Émile` sorts between `adam` and `Zoe`), then ranked so that ties share a rank and the next distinct total takes
//! its 1-indexed position: `1, 1, 3, 4, 4, 6`.

use std::cmp::Ordering;
use std::collections::HashSet;

use feruca::Collator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{aggregate, Aggregate, CalculateError};
use crate::models::{Metric, RankedEntity, ScoredEntity, TipsterId, TipsterReview};

/// How non-participants are treated when ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingMode {
    /// Order purely by total. A non-participant is a total of 0 like any other.
    #[default]
    Leaderboard,
    /// Participants first, then total. Non-participants always rank after every
    /// participant, including participants whose total is 0 or negative.
    Selections,
}

/// Rank scored entities. Totals and participation come from each entity's per-race values.
pub fn rank(
    entities: Vec<ScoredEntity>,
    mode: OrderingMode,
) -> Result<Vec<RankedEntity>, CalculateError> {
    let rows = entities
        .into_iter()
        .map(|entity| {
            let agg = aggregate(&entity.per_race_values);
            (entity, agg)
        })
        .collect();

    rank_aggregated(rows, mode)
}

/// Rank entities whose aggregate has already been computed.
///
/// Used where participation is decided by something other than the scored values,
/// e.g. the review tables where submitting a tip counts even before results are in.
pub fn rank_aggregated(
    mut rows: Vec<(ScoredEntity, Aggregate)>,
    mode: OrderingMode,
) -> Result<Vec<RankedEntity>, CalculateError> {
    validate(&rows)?;

    let mut collator = Collator::default();
    rows.sort_by(|a, b| compare(&mut collator, a, b, mode));

    let ranks = assign_dense_ranks(&rows, |prev, cur| same_rank(prev, cur, mode));

    let ranked: Vec<RankedEntity> = rows
        .into_iter()
        .zip(ranks)
        .map(|((entity, agg), rank)| RankedEntity {
            entity,
            total: agg.total,
            has_participated: agg.has_participated,
            rank,
        })
        .collect();

    debug!("Ranked {} entities ({:?})", ranked.len(), mode);
    Ok(ranked)
}

/// Rank the tipsters of one raceday on a metric.
///
/// In `Selections` mode a tipster participates when they submitted tips; in
/// `Leaderboard` mode participation follows the metric's values.
pub fn rank_reviews(
    reviews: &[TipsterReview],
    metric: Metric,
    mode: OrderingMode,
) -> Result<Vec<RankedEntity>, CalculateError> {
    let rows = reviews
        .iter()
        .map(|review| {
            let entity = review.scored_entity(metric);
            let mut agg = aggregate(&entity.per_race_values);
            if mode == OrderingMode::Selections {
                agg.has_participated = review.has_tipped();
            }
            (entity, agg)
        })
        .collect();

    rank_aggregated(rows, mode)
}

/// Assign dense ranks to an already sorted sequence.
///
/// `same(prev, cur)` decides whether `cur` ties with the element before it. A tie
/// inherits the previous rank; otherwise the rank becomes the 1-indexed position.
pub fn assign_dense_ranks<T, F>(sorted: &[T], same: F) -> Vec<u32>
where
    F: Fn(&T, &T) -> bool,
{
    let mut ranks = Vec::with_capacity(sorted.len());
    let mut current = 1u32;

    for (i, item) in sorted.iter().enumerate() {
        if i > 0 && !same(&sorted[i - 1], item) {
            current = i as u32 + 1;
        }
        ranks.push(current);
    }

    ranks
}

fn validate(rows: &[(ScoredEntity, Aggregate)]) -> Result<(), CalculateError> {
    let mut seen = HashSet::with_capacity(rows.len());

    for (entity, agg) in rows {
        if !seen.insert(entity.id) {
            return Err(CalculateError::DuplicateEntity(entity.id));
        }

        for (&race_no, value) in &entity.per_race_values {
            if race_no == 0 {
                return Err(CalculateError::InvalidRaceNumber(race_no));
            }
            if !value.is_finite() {
                return Err(CalculateError::NonFiniteValue {
                    entity: entity.id,
                    race_no,
                });
            }
        }

        if !agg.total.is_finite() {
            return Err(CalculateError::TotalOverflow(entity.id));
        }
    }

    Ok(())
}

fn compare(
    collator: &mut Collator,
    a: &(ScoredEntity, Aggregate),
    b: &(ScoredEntity, Aggregate),
    mode: OrderingMode,
) -> Ordering {
    let participation = match mode {
        OrderingMode::Selections => b.1.has_participated.cmp(&a.1.has_participated),
        OrderingMode::Leaderboard => Ordering::Equal,
    };

    participation
        .then_with(|| b.1.total.partial_cmp(&a.1.total).unwrap_or(Ordering::Equal))
        .then_with(|| compare_names(collator, &a.0, &b.0))
}

fn compare_names(collator: &mut Collator, a: &ScoredEntity, b: &ScoredEntity) -> Ordering {
    name_order(
        collator,
        (a.display_name.as_str(), a.id),
        (b.display_name.as_str(), b.id),
    )
}

/// Collated name order, falling back to exact name and then id so the order is
/// total for any input permutation.
pub(crate) fn name_order(
    collator: &mut Collator,
    a: (&str, TipsterId),
    b: (&str, TipsterId),
) -> Ordering {
    collator
        .collate(a.0, b.0)
        .then_with(|| a.0.cmp(b.0))
        .then_with(|| a.1.cmp(&b.1))
}

fn same_rank(
    prev: &(ScoredEntity, Aggregate),
    cur: &(ScoredEntity, Aggregate),
    mode: OrderingMode,
) -> bool {
    let participation_matches = match mode {
        OrderingMode::Selections => prev.1.has_participated == cur.1.has_participated,
        OrderingMode::Leaderboard => true,
    };
    participation_matches && prev.1.total == cur.1.total
}
