//! In-memory status report repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskId, TaskStatusReport},
    ports::{StatusReportRepository, StatusReportRepositoryError, StatusReportRepositoryResult},
};

/// Thread-safe append-only report log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusReportRepository {
    reports: Arc<RwLock<Vec<TaskStatusReport>>>,
}

impl InMemoryStatusReportRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> StatusReportRepositoryError {
    StatusReportRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl StatusReportRepository for InMemoryStatusReportRepository {
    async fn append(&self, report: &TaskStatusReport) -> StatusReportRepositoryResult<()> {
        let mut reports = self.reports.write().map_err(poisoned)?;
        if reports.iter().any(|existing| existing.id() == report.id()) {
            return Err(StatusReportRepositoryError::DuplicateReport(report.id()));
        }
        reports.push(report.clone());
        Ok(())
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> StatusReportRepositoryResult<Vec<TaskStatusReport>> {
        let reports = self.reports.read().map_err(poisoned)?;
        let mut matched: Vec<TaskStatusReport> = reports
            .iter()
            .filter(|report| report.task_id() == task_id)
            .cloned()
            .collect();
        matched.sort_by_key(TaskStatusReport::created_at);
        Ok(matched)
    }
}
