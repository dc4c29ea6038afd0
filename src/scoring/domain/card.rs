//! Tally of an employee's terminal task outcomes.

use crate::identity::domain::PerformanceRecord;
use crate::task::domain::{Task, TaskStatus};

/// Completed and failed task counts with their summed score values.
///
/// Only `completed` and `failed` tasks contribute; every other status is
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreCard {
    completed: u32,
    failed: u32,
    completed_weight: u64,
    failed_weight: u64,
}

impl ScoreCard {
    /// Tallies the terminal outcomes among `tasks`.
    #[must_use]
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks
            .into_iter()
            .fold(Self::default(), |card, task| card.record(task))
    }

    fn record(mut self, task: &Task) -> Self {
        let weight = u64::from(task.score_value().value());
        match task.status() {
            TaskStatus::Completed => {
                self.completed = self.completed.saturating_add(1);
                self.completed_weight = self.completed_weight.saturating_add(weight);
            }
            TaskStatus::Failed => {
                self.failed = self.failed.saturating_add(1);
                self.failed_weight = self.failed_weight.saturating_add(weight);
            }
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Transferred => {}
        }
        self
    }

    /// Number of completed tasks.
    #[must_use]
    pub const fn completed(&self) -> u32 {
        self.completed
    }

    /// Number of failed tasks.
    #[must_use]
    pub const fn failed(&self) -> u32 {
        self.failed
    }

    /// Returns `completed_weight - failure_weight * failed_weight`, floored
    /// at zero.
    #[must_use]
    pub fn score(&self, failure_weight: u32) -> u64 {
        let penalty = self.failed_weight.saturating_mul(u64::from(failure_weight));
        self.completed_weight.saturating_sub(penalty)
    }

    /// Completed share of terminal tasks in percent; `0.0` without any.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "success rate is a percentage of two integer counts"
    )]
    pub fn success_rate(&self) -> f64 {
        let terminal = self.completed.saturating_add(self.failed);
        if terminal == 0 {
            return 0.0;
        }
        f64::from(self.completed) / f64::from(terminal) * 100.0
    }

    /// Builds the profile fields written back by a recompute.
    #[must_use]
    pub fn performance(&self, failure_weight: u32) -> PerformanceRecord {
        PerformanceRecord {
            score: self.score(failure_weight),
            success_rate: self.success_rate(),
            tasks_completed: self.completed,
            tasks_failed: self.failed,
        }
    }
}
