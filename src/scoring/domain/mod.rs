//! Score arithmetic and report projections.

mod card;
mod stats;

pub use card::ScoreCard;
pub use stats::{
    CallerStats, Dashboard, LeaderboardEntry, PerformanceSummary, TaskBreakdown, TeamStats,
    round2,
};
