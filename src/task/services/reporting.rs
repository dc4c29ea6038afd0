//! Reporting path: append-only status reports with advisory feedback.

use crate::error::ErrorKind;
use crate::identity::domain::{Actor, UserId};
use crate::task::{
    domain::{Progress, TaskDomainError, TaskId, TaskStatusReport},
    ports::{
        FeedbackError, FeedbackGenerator, FeedbackRequest, StatusReportRepository,
        StatusReportRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for the reporting path.
///
/// Feedback failures never appear here; they are stored on the report.
#[derive(Debug, Error)]
pub enum StatusReportError {
    /// Report validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Report persistence failed.
    #[error(transparent)]
    Reports(#[from] StatusReportRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The caller is neither the assignee nor a manager.
    #[error("user {0} may not report on task {1}")]
    Forbidden(UserId, TaskId),
}

impl StatusReportError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_)
            | Self::Tasks(TaskRepositoryError::DuplicateTask(_))
            | Self::Reports(StatusReportRepositoryError::DuplicateReport(_)) => {
                ErrorKind::Validation
            }
            Self::NotFound(_) | Self::Tasks(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Tasks(TaskRepositoryError::Persistence(_))
            | Self::Reports(StatusReportRepositoryError::Persistence(_)) => ErrorKind::Persistence,
            Self::Forbidden(..) => ErrorKind::Forbidden,
        }
    }
}

/// Result type for reporting operations.
pub type StatusReportResult<T> = Result<T, StatusReportError>;

/// Files and lists status reports, consulting the feedback collaborator.
#[derive(Clone)]
pub struct StatusReportService<T, S, F, C>
where
    T: TaskRepository,
    S: StatusReportRepository,
    F: FeedbackGenerator,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    reports: Arc<S>,
    feedback: Arc<F>,
    clock: Arc<C>,
    feedback_timeout: Duration,
}

impl<T, S, F, C> StatusReportService<T, S, F, C>
where
    T: TaskRepository,
    S: StatusReportRepository,
    F: FeedbackGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a new reporting service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        reports: Arc<S>,
        feedback: Arc<F>,
        clock: Arc<C>,
        feedback_timeout: Duration,
    ) -> Self {
        Self {
            tasks,
            reports,
            feedback,
            clock,
            feedback_timeout,
        }
    }

    /// Appends a status report to a task.
    ///
    /// Feedback is requested with a bounded timeout. When it fails the
    /// report is still stored, carrying the failure reason instead.
    ///
    /// # Errors
    ///
    /// Returns [`StatusReportError::NotFound`],
    /// [`StatusReportError::Forbidden`] or a validation error. Never fails
    /// because of the feedback collaborator.
    pub async fn file_report(
        &self,
        actor: &Actor,
        task_id: TaskId,
        report_text: &str,
        percent: u8,
    ) -> StatusReportResult<TaskStatusReport> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(StatusReportError::NotFound(task_id))?;
        if !actor.is_manager_or(task.assigned_to()) {
            return Err(StatusReportError::Forbidden(actor.user_id(), task_id));
        }

        let progress = Progress::new(percent)?;
        let draft = TaskStatusReport::new(
            task_id,
            actor.user_id(),
            report_text,
            progress,
            &*self.clock,
        )?;

        let request = FeedbackRequest {
            task_title: task.title().to_owned(),
            report_text: draft.report_text().to_owned(),
            progress,
        };
        let report = match self.request_feedback(&request).await {
            Ok(feedback) => draft.with_feedback(feedback),
            Err(err) => {
                warn!(
                    task_id = %task_id,
                    error = %err,
                    kind = ErrorKind::ExternalService.as_str(),
                    "feedback generation failed; storing report without feedback"
                );
                draft.with_feedback_error(err.to_string())
            }
        };

        self.reports.append(&report).await?;
        info!(
            task_id = %task_id,
            report_id = %report.id(),
            progress = progress.percent(),
            "status report filed"
        );
        Ok(report)
    }

    /// Lists a task's reports, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StatusReportError::NotFound`] or
    /// [`StatusReportError::Forbidden`].
    pub async fn list_reports(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> StatusReportResult<Vec<TaskStatusReport>> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(StatusReportError::NotFound(task_id))?;
        if !actor.is_manager_or(task.assigned_to()) {
            return Err(StatusReportError::Forbidden(actor.user_id(), task_id));
        }
        Ok(self.reports.list_for_task(task_id).await?)
    }

    async fn request_feedback(&self, request: &FeedbackRequest) -> Result<String, FeedbackError> {
        tokio::time::timeout(self.feedback_timeout, self.feedback.generate_feedback(request))
            .await
            .unwrap_or_else(|_| {
                Err(FeedbackError::Timeout(
                    u64::try_from(self.feedback_timeout.as_millis()).unwrap_or(u64::MAX),
                ))
            })
    }
}
