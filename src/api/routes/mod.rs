pub mod comps;
pub mod health;
pub mod leaderboard;
pub mod racedays;
pub mod races;
pub mod review;
