//! Leaderboard, team and dashboard projections.

use crate::identity::domain::{EmployeeProfile, ManagerProfile, UserId};
use serde::Serialize;

/// Rounds to two decimal places.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "presentation rounding")]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based contiguous rank.
    pub rank: usize,
    /// Ranked employee.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Job position.
    pub position: Option<String>,
    /// Performance score.
    pub score: u64,
    /// Success rate in percent.
    pub success_rate: f64,
    /// Completed task count.
    pub tasks_completed: u32,
    /// Leave score.
    pub leave_score: u32,
}

impl LeaderboardEntry {
    /// Ranks profiles by score descending, breaking ties by ascending user
    /// ID, and keeps the first `limit`.
    #[must_use]
    pub fn rank_profiles(mut profiles: Vec<EmployeeProfile>, limit: usize) -> Vec<Self> {
        profiles.sort_by(|left, right| {
            right
                .score()
                .cmp(&left.score())
                .then_with(|| left.user_id().cmp(&right.user_id()))
        });
        profiles
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, profile)| Self {
                rank: index.saturating_add(1),
                user_id: profile.user_id(),
                name: profile.name().to_owned(),
                position: profile.position().map(str::to_owned),
                score: profile.score(),
                success_rate: profile.success_rate(),
                tasks_completed: profile.tasks_completed(),
                leave_score: profile.leave_score(),
            })
            .collect()
    }
}

/// Team-wide aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TeamStats {
    /// Number of employee profiles.
    pub total_employees: usize,
    /// Mean score, rounded to two decimals.
    pub average_score: f64,
    /// Mean success rate, rounded to two decimals.
    pub average_success_rate: f64,
    /// Store-wide completed task count.
    pub total_tasks_completed: u64,
    /// Store-wide count of `pending` and `in_progress` tasks.
    pub total_tasks_open: u64,
}

impl TeamStats {
    /// Aggregates `profiles`; an empty slice yields the all-zero struct.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "averages are reported as rounded floats"
    )]
    pub fn from_profiles(
        profiles: &[EmployeeProfile],
        total_tasks_completed: u64,
        total_tasks_open: u64,
    ) -> Self {
        if profiles.is_empty() {
            return Self::default();
        }
        let count = profiles.len() as f64;
        let score_sum: f64 = profiles.iter().map(|profile| profile.score() as f64).sum();
        let rate_sum: f64 = profiles.iter().map(EmployeeProfile::success_rate).sum();
        Self {
            total_employees: profiles.len(),
            average_score: round2(score_sum / count),
            average_success_rate: round2(rate_sum / count),
            total_tasks_completed,
            total_tasks_open,
        }
    }
}

/// Task counts by status for a dashboard scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskBreakdown {
    /// All tasks in scope.
    pub total: u64,
    /// Completed tasks.
    pub completed: u64,
    /// Tasks in progress.
    pub in_progress: u64,
    /// Pending tasks.
    pub pending: u64,
    /// Not completed and past their due date.
    pub overdue: u64,
}

/// Dashboard figures. Team statistics are present for managers only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dashboard {
    /// Task counts for the caller's scope.
    pub tasks: TaskBreakdown,
    /// Team aggregates.
    pub team: Option<TeamStats>,
}

/// Recent performance of one user over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    /// Subject user.
    pub user_id: UserId,
    /// Display name from the user's profile.
    pub name: String,
    /// Tasks created inside the window.
    pub total_tasks: u64,
    /// Completed tasks inside the window.
    pub completed_tasks: u64,
    /// Overdue tasks inside the window.
    pub overdue_tasks: u64,
    /// Completed share in percent; `0.0` without tasks.
    pub completion_rate: f64,
    /// Current score; zero for managers.
    pub score: u64,
}

/// The caller's own profile after a recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum CallerStats {
    /// Employee profile with freshly recomputed performance fields.
    Employee(EmployeeProfile),
    /// Manager profile.
    Manager(ManagerProfile),
}
