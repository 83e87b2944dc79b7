//! Analytics module for benchmark score summaries

pub mod scores;

pub use scores::{calculate_statistics, ScoreStatistics};
