//! Error types for leave domain validation and parsing.

use super::{LeaveRequestId, LeaveStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating leave requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeaveDomainError {
    /// The reason is empty after trimming.
    #[error("leave reason must not be empty")]
    EmptyReason,

    /// The end of the period is not after its start.
    #[error("leave must end after it starts (start {start}, end {end})")]
    InvalidPeriod {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },

    /// The request has already been approved or rejected.
    #[error("leave request {id} is already {status}")]
    AlreadyDecided {
        /// Leave request.
        id: LeaveRequestId,
        /// Terminal status.
        status: LeaveStatus,
    },
}

impl LeaveDomainError {
    /// Returns `true` for errors raised by the status state machine.
    #[must_use]
    pub const fn is_transition_error(&self) -> bool {
        matches!(self, Self::AlreadyDecided { .. })
    }
}

/// Error returned while parsing leave statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown leave status: {0}")]
pub struct ParseLeaveStatusError(pub String);
