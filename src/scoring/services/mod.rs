//! Scoring engine orchestration.

mod engine;

pub use engine::{PERFORMANCE_WINDOW_DAYS, ScoringError, ScoringResult, ScoringService};
