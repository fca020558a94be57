//! Core data models for tipster competitions.

mod ids;
mod race;
mod raceday;
mod review;
mod tip;
mod tipster;

pub use ids::*;
pub use race::*;
pub use raceday::*;
pub use review::*;
pub use tip::*;
pub use tipster::*;
