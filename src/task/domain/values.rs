//! Status, priority and score-weight value types.

use super::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task finished successfully.
    Completed,
    /// Task finished unsuccessfully.
    Failed,
    /// Task was handed to another assignee by a leave transfer.
    Transferred,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Failed,
        Self::Transferred,
    ];

    /// Statuses that still require work and move with a leave transfer.
    pub const OPEN: [Self; 2] = [Self::Pending, Self::InProgress];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Transferred => "transferred",
        }
    }

    /// Returns `true` when the direct status-update path may move a task
    /// from `self` to `next`.
    ///
    /// `transferred` is deliberately absent: only the leave transfer
    /// reaches it.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::InProgress, Self::Completed | Self::Failed)
        )
    }

    /// Returns `true` for `pending` and `in_progress`.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns `true` for statuses that count toward scoring.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "transferred" => Ok(Self::Transferred),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Advisory task priority. Does not gate transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
    /// Critical priority.
    Critical,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Positive score weight of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreValue(u32);

impl ScoreValue {
    /// Weight assigned when none is given.
    pub const DEFAULT: Self = Self(1_000);

    /// Largest weight representable in the `INTEGER` column.
    pub const MAX_PERSISTED_VALUE: u32 = i32::MAX as u32;

    /// Creates a validated score value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidScoreValue`] when `value` is zero
    /// or exceeds the schema-backed maximum (`i32::MAX`).
    pub const fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(TaskDomainError::InvalidScoreValue(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying weight.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for ScoreValue {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
