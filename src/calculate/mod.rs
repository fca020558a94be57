//! Ranking, aggregation and date-window engine.
//!
//! Pure functions over already-loaded data:
//! - Per-tipster totals and participation
//! - Dense leaderboard ranks and "load more" pagination
//! - Raceday status relative to an explicit reference date
//! - Runner consensus and substitution combinations
//! - Next-to-jump detection and review tables

pub mod aggregate;
pub mod format;
pub mod paginate;
pub mod racecard;
pub mod rank;
pub mod review;
pub mod window;

pub use aggregate::{
    aggregate, combinations_by_race, extract_unique_combinations, runner_consensus, Aggregate,
    RunnerConsensus,
};
pub use format::{format_currency, format_place_odds, format_win_odds, ordinal};
pub use paginate::{Page, Paginator, INITIAL_ROWS, ROWS_PER_LOAD};
pub use racecard::{
    build_racecard, name_substitutions, next_to_jump_index, race_status, result_lines,
    NamedSubstitution, RaceSummary, Racecard, ResultLine,
};
pub use rank::{assign_dense_ranks, rank, rank_aggregated, rank_reviews, OrderingMode};
pub use review::{ReviewBoard, ReviewRow};
pub use window::{
    classify, classify_all, day_offset, filter_and_sort_past, filter_window, Dated, WindowSpec,
};

use thiserror::Error;

use crate::models::{RaceNo, TipsterId};

/// Input validation failures raised by the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculateError {
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Non-finite value for tipster {entity} in race {race_no}")]
    NonFiniteValue { entity: TipsterId, race_no: RaceNo },

    #[error("Invalid race number: {0}")]
    InvalidRaceNumber(RaceNo),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),

    #[error("Duplicate tipster id: {0}")]
    DuplicateEntity(TipsterId),

    #[error("Total for tipster {0} is not finite")]
    TotalOverflow(TipsterId),
}
