//! # Tipster Board
//!
//! Leaderboards, raceday windows and tip consensus for a horse-racing tipster
//! competition.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (racedays, races, tips, reviews, ids)
//! - **calculate**: Ranking, pagination, date windows and aggregation
//! - **storage**: JSONL files per competition and snapshot import
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
