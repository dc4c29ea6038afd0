//! Append-only progress notes filed against a task.

use super::{ReportId, TaskDomainError, TaskId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reported completion percentage, 0 to 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidProgress`] above 100.
    pub const fn new(percent: u8) -> Result<Self, TaskDomainError> {
        if percent > 100 {
            return Err(TaskDomainError::InvalidProgress(percent));
        }
        Ok(Self(percent))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Immutable progress note tied to a task and the reporting user.
///
/// Feedback fields are auxiliary: at most one of them is set, and neither
/// influences task state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusReport {
    id: ReportId,
    task_id: TaskId,
    employee_id: UserId,
    report_text: String,
    progress: Progress,
    feedback: Option<String>,
    feedback_error: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReportData {
    /// Persisted report identifier.
    pub id: ReportId,
    /// Reported task.
    pub task_id: TaskId,
    /// Reporting user.
    pub employee_id: UserId,
    /// Report body.
    pub report_text: String,
    /// Reported progress.
    pub progress: Progress,
    /// Generated feedback, if any.
    pub feedback: Option<String>,
    /// Reason feedback generation failed, if it did.
    pub feedback_error: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskStatusReport {
    /// Creates a report without feedback.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReport`] for blank text.
    pub fn new(
        task_id: TaskId,
        employee_id: UserId,
        report_text: &str,
        progress: Progress,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let trimmed = report_text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyReport);
        }
        Ok(Self {
            id: ReportId::new(),
            task_id,
            employee_id,
            report_text: trimmed.to_owned(),
            progress,
            feedback: None,
            feedback_error: None,
            created_at: clock.utc(),
        })
    }

    /// Attaches generated feedback.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self.feedback_error = None;
        self
    }

    /// Records why feedback could not be generated.
    #[must_use]
    pub fn with_feedback_error(mut self, reason: impl Into<String>) -> Self {
        self.feedback = None;
        self.feedback_error = Some(reason.into());
        self
    }

    /// Reconstructs a report from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReportData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            employee_id: data.employee_id,
            report_text: data.report_text,
            progress: data.progress,
            feedback: data.feedback,
            feedback_error: data.feedback_error,
            created_at: data.created_at,
        }
    }

    /// Returns the report identifier.
    #[must_use]
    pub const fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the reported task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the reporting user.
    #[must_use]
    pub const fn employee_id(&self) -> UserId {
        self.employee_id
    }

    /// Returns the report body.
    #[must_use]
    pub fn report_text(&self) -> &str {
        &self.report_text
    }

    /// Returns the reported progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns generated feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Returns the feedback failure reason, if any.
    #[must_use]
    pub fn feedback_error(&self) -> Option<&str> {
        self.feedback_error.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
