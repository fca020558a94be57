//! Raceday review tables: everyone's tips, points and odds side by side.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use feruca::Collator;
use serde::Serialize;

use super::rank::{name_order, rank_reviews, OrderingMode};
use super::{aggregate, CalculateError};
use crate::models::{Metric, RaceNo, Tip, TipsterId, TipsterReview};

/// One tipster's row in a review table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub tipster_id: TipsterId,
    pub nickname: String,
    pub slogan: Option<String>,
    pub tips: BTreeMap<RaceNo, Tip>,
    pub points: BTreeMap<RaceNo, f64>,
    pub odds: BTreeMap<RaceNo, f64>,
    pub total_points: f64,
    pub total_odds: f64,
    pub has_tipped: bool,
    /// Dense rank within the table; `None` on the tips table
    pub rank: Option<u32>,
}

impl ReviewRow {
    fn from_review(review: &TipsterReview, rank: Option<u32>) -> Self {
        Self {
            tipster_id: review.tipster_id,
            nickname: review.nickname.clone(),
            slogan: review.slogan.clone(),
            tips: review.tips.clone(),
            points: review.points.clone(),
            odds: review.odds.clone(),
            total_points: aggregate(&review.points).total,
            total_odds: aggregate(&review.odds).total,
            has_tipped: review.has_tipped(),
            rank,
        }
    }

    /// Tip cell text: `-`, `4` or `4 s11`.
    pub fn tip_cell(&self, race_no: RaceNo) -> String {
        match self.tips.get(&race_no) {
            Some(tip) if self.has_tipped => tip.to_string(),
            _ => "-".to_string(),
        }
    }

    /// Points cell text. Races without a score show 0 for tipsters who tipped.
    pub fn points_cell(&self, race_no: RaceNo) -> String {
        if !self.has_tipped {
            return "-".to_string();
        }
        let points = self.points.get(&race_no).copied().unwrap_or(0.0);
        format!("{}", points)
    }

    /// Odds cell text to two decimals.
    pub fn odds_cell(&self, race_no: RaceNo) -> String {
        if !self.has_tipped {
            return "-".to_string();
        }
        let odds = self.odds.get(&race_no).copied().unwrap_or(0.0);
        format!("{:.2}", odds)
    }

    /// Points total cell: `-` for tipsters who did not tip.
    pub fn points_total_cell(&self) -> String {
        if !self.has_tipped {
            return "-".to_string();
        }
        format!("{}", self.total_points)
    }

    /// Odds return total cell to two decimals: `-` for tipsters who did not tip.
    pub fn odds_total_cell(&self) -> String {
        if !self.has_tipped {
            return "-".to_string();
        }
        format!("{:.2}", self.total_odds)
    }
}

/// The three review tables for a raceday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewBoard {
    pub race_numbers: Vec<RaceNo>,
    /// Tipped first, then by name
    pub tips_table: Vec<ReviewRow>,
    /// Tipped first, then points (descending), then name
    pub points_table: Vec<ReviewRow>,
    /// Tipped first, then odds return (descending), then name
    pub odds_table: Vec<ReviewRow>,
}

impl ReviewBoard {
    /// Build the tables. `race_numbers` is the raceday's race list; any race that only
    /// appears in a review is added so no submitted tip is hidden.
    pub fn build(
        reviews: &[TipsterReview],
        race_numbers: &[RaceNo],
    ) -> Result<Self, CalculateError> {
        let mut races: BTreeSet<RaceNo> = race_numbers.iter().copied().collect();
        for review in reviews {
            races.extend(review.tips.keys().copied());
        }
        if races.contains(&0) {
            return Err(CalculateError::InvalidRaceNumber(0));
        }

        let by_id: HashMap<TipsterId, &TipsterReview> =
            reviews.iter().map(|r| (r.tipster_id, r)).collect();

        let ranked_table = |metric: Metric| -> Result<Vec<ReviewRow>, CalculateError> {
            let ranked = rank_reviews(reviews, metric, OrderingMode::Selections)?;
            Ok(ranked
                .iter()
                .filter_map(|r| {
                    by_id
                        .get(&r.entity.id)
                        .map(|review| ReviewRow::from_review(review, Some(r.rank)))
                })
                .collect())
        };

        let points_table = ranked_table(Metric::Points)?;
        let odds_table = ranked_table(Metric::Odds)?;

        let mut tips_table: Vec<ReviewRow> = reviews
            .iter()
            .map(|review| ReviewRow::from_review(review, None))
            .collect();
        let mut collator = Collator::default();
        tips_table.sort_by(|a, b| {
            b.has_tipped.cmp(&a.has_tipped).then_with(|| {
                name_order(
                    &mut collator,
                    (a.nickname.as_str(), a.tipster_id),
                    (b.nickname.as_str(), b.tipster_id),
                )
            })
        });

        Ok(Self {
            race_numbers: races.into_iter().collect(),
            tips_table,
            points_table,
            odds_table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RacedayId;
    use pretty_assertions::assert_eq;

    fn reviews() -> Vec<TipsterReview> {
        let raceday = RacedayId::new(1);
        vec![
            TipsterReview::new(raceday, TipsterId::new(1), "zara".to_string())
                .with_tip(1, Tip::main(4))
                .with_tip(2, Tip::with_alt(6, 1))
                .with_points(1, 3.0)
                .with_points(2, 0.0)
                .with_odds(1, 8.4),
            TipsterReview::new(raceday, TipsterId::new(2), "Abe".to_string()),
            TipsterReview::new(raceday, TipsterId::new(3), "Bea".to_string())
                .with_tip(1, Tip::main(2))
                .with_points(1, 3.0)
                .with_odds(1, 12.0),
            TipsterReview::new(raceday, TipsterId::new(4), "cal".to_string())
                .with_tip(1, Tip::main(9)),
        ]
    }

    fn names(rows: &[ReviewRow]) -> Vec<&str> {
        rows.iter().map(|r| r.nickname.as_str()).collect()
    }

    #[test]
    fn test_tips_table_order() {
        let board = ReviewBoard::build(&reviews(), &[1, 2, 3]).unwrap();
        assert_eq!(names(&board.tips_table), vec!["Bea", "cal", "zara", "Abe"]);
        assert!(board.tips_table.iter().all(|r| r.rank.is_none()));
    }

    #[test]
    fn test_tips_table_collates_names() {
        let raceday = RacedayId::new(1);
        let reviews = vec![
            TipsterReview::new(raceday, TipsterId::new(1), "Zoe".to_string())
                .with_tip(1, Tip::main(1)),
            TipsterReview::new(raceday, TipsterId::new(2), "Émile".to_string())
                .with_tip(1, Tip::main(2)),
            TipsterReview::new(raceday, TipsterId::new(3), "adam".to_string())
                .with_tip(1, Tip::main(3)),
        ];

        let board = ReviewBoard::build(&reviews, &[1]).unwrap();
        assert_eq!(names(&board.tips_table), vec!["adam", "Émile", "Zoe"]);
    }

    #[test]
    fn test_points_table_order_and_ranks() {
        let board = ReviewBoard::build(&reviews(), &[1, 2, 3]).unwrap();

        assert_eq!(names(&board.points_table), vec!["Bea", "zara", "cal", "Abe"]);
        let ranks: Vec<Option<u32>> = board.points_table.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(1), Some(3), Some(4)]);
    }

    #[test]
    fn test_odds_table_order() {
        let board = ReviewBoard::build(&reviews(), &[1, 2, 3]).unwrap();

        assert_eq!(names(&board.odds_table), vec!["Bea", "zara", "cal", "Abe"]);
        assert_eq!(board.odds_table[0].total_odds, 12.0);
        assert_eq!(board.odds_table[2].total_odds, 0.0);
        assert!(board.odds_table[2].has_tipped);
    }

    #[test]
    fn test_cells() {
        let board = ReviewBoard::build(&reviews(), &[1, 2, 3]).unwrap();
        let zara = board
            .tips_table
            .iter()
            .find(|r| r.nickname == "zara")
            .unwrap();
        let abe = board.tips_table.iter().find(|r| r.nickname == "Abe").unwrap();

        assert_eq!(zara.tip_cell(2), "6 s1");
        assert_eq!(zara.tip_cell(3), "-");
        assert_eq!(zara.points_cell(1), "3");
        assert_eq!(zara.points_cell(3), "0");
        assert_eq!(zara.odds_cell(1), "8.40");
        assert_eq!(abe.tip_cell(1), "-");
        assert_eq!(abe.points_cell(1), "-");
        assert_eq!(abe.odds_cell(1), "-");
    }

    #[test]
    fn test_total_cells() {
        let board = ReviewBoard::build(&reviews(), &[1, 2, 3]).unwrap();
        let row = |name: &str| board.points_table.iter().find(|r| r.nickname == name).unwrap();

        assert_eq!(row("zara").points_total_cell(), "3");
        assert_eq!(row("zara").odds_total_cell(), "8.40");
        // Tipped with no results yet: a real zero, not a dash
        assert_eq!(row("cal").points_total_cell(), "0");
        assert_eq!(row("cal").odds_total_cell(), "0.00");
        assert_eq!(row("Abe").points_total_cell(), "-");
        assert_eq!(row("Abe").odds_total_cell(), "-");
    }

    #[test]
    fn test_race_numbers_include_tipped_races() {
        let board = ReviewBoard::build(&reviews(), &[1]).unwrap();
        assert_eq!(board.race_numbers, vec![1, 2]);
    }

    #[test]
    fn test_empty_board() {
        let board = ReviewBoard::build(&[], &[1, 2]).unwrap();
        assert!(board.tips_table.is_empty());
        assert!(board.points_table.is_empty());
        assert_eq!(board.race_numbers, vec![1, 2]);
    }
}
