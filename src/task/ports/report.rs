//! Repository port for append-only task status reports.

use crate::task::domain::{ReportId, TaskId, TaskStatusReport};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for status report repository operations.
pub type StatusReportRepositoryResult<T> = Result<T, StatusReportRepositoryError>;

/// Status report persistence contract. Reports are never updated.
#[async_trait]
pub trait StatusReportRepository: Send + Sync {
    /// Appends a report.
    ///
    /// # Errors
    ///
    /// Returns [`StatusReportRepositoryError::DuplicateReport`] when the
    /// report ID already exists.
    async fn append(&self, report: &TaskStatusReport) -> StatusReportRepositoryResult<()>;

    /// Returns every report filed against `task_id`, oldest first.
    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> StatusReportRepositoryResult<Vec<TaskStatusReport>>;
}

/// Errors returned by status report repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StatusReportRepositoryError {
    /// A report with the same identifier already exists.
    #[error("duplicate report identifier: {0}")]
    DuplicateReport(ReportId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatusReportRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
