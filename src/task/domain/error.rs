//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The score value is zero or too large to persist.
    #[error("invalid score value {0}, expected a positive integer up to 2147483647")]
    InvalidScoreValue(u32),

    /// An hour estimate or measurement is negative or not finite.
    #[error("{0} must be a finite, non-negative number of hours")]
    InvalidHours(&'static str),

    /// The requested status change is not part of the task state machine.
    #[error("invalid state transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The operation requires an open (`pending` or `in_progress`) task.
    #[error("task {task_id} is not open (status {status})")]
    TaskNotOpen {
        /// Task being modified.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// The status report text is empty after trimming.
    #[error("status report text must not be empty")]
    EmptyReport,

    /// The progress percentage exceeds 100.
    #[error("invalid progress {0}%, expected 0 to 100")]
    InvalidProgress(u8),
}

impl TaskDomainError {
    /// Returns `true` for errors raised by the status state machine.
    #[must_use]
    pub const fn is_transition_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidStateTransition { .. } | Self::TaskNotOpen { .. }
        )
    }
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
