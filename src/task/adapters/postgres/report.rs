//! `PostgreSQL` repository implementation for status reports.

use super::{models::StatusReportRow, schema::task_status_reports};
use crate::identity::domain::UserId;
use crate::postgres::PgPool;
use crate::task::{
    domain::{PersistedReportData, Progress, ReportId, TaskId, TaskStatusReport},
    ports::{StatusReportRepository, StatusReportRepositoryError, StatusReportRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed status report repository.
#[derive(Debug, Clone)]
pub struct PostgresStatusReportRepository {
    pool: PgPool,
}

impl PostgresStatusReportRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StatusReportRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StatusReportRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(StatusReportRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StatusReportRepositoryError::persistence)?
    }
}

impl From<DieselError> for StatusReportRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl StatusReportRepository for PostgresStatusReportRepository {
    async fn append(&self, report: &TaskStatusReport) -> StatusReportRepositoryResult<()> {
        let report_id = report.id();
        let row = to_row(report);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_status_reports::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StatusReportRepositoryError::DuplicateReport(report_id)
                    }
                    other => StatusReportRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> StatusReportRepositoryResult<Vec<TaskStatusReport>> {
        self.run_blocking(move |connection| {
            let rows = task_status_reports::table
                .filter(task_status_reports::task_id.eq(task_id.into_inner()))
                .order(task_status_reports::created_at.asc())
                .select(StatusReportRow::as_select())
                .load::<StatusReportRow>(connection)?;
            rows.into_iter().map(row_to_report).collect()
        })
        .await
    }
}

fn to_row(report: &TaskStatusReport) -> StatusReportRow {
    StatusReportRow {
        id: report.id().into_inner(),
        task_id: report.task_id().into_inner(),
        employee_id: report.employee_id().into_inner(),
        report_text: report.report_text().to_owned(),
        progress: i16::from(report.progress().percent()),
        feedback: report.feedback().map(str::to_owned),
        feedback_error: report.feedback_error().map(str::to_owned),
        created_at: report.created_at(),
    }
}

fn row_to_report(row: StatusReportRow) -> StatusReportRepositoryResult<TaskStatusReport> {
    let percent = u8::try_from(row.progress).map_err(StatusReportRepositoryError::persistence)?;
    let progress = Progress::new(percent).map_err(StatusReportRepositoryError::persistence)?;
    Ok(TaskStatusReport::from_persisted(PersistedReportData {
        id: ReportId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        employee_id: UserId::from_uuid(row.employee_id),
        report_text: row.report_text,
        progress,
        feedback: row.feedback,
        feedback_error: row.feedback_error,
        created_at: row.created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::{row_to_report, to_row};
    use crate::identity::domain::UserId;
    use crate::task::domain::{Progress, TaskId, TaskStatusReport};
    use mockable::DefaultClock;

    #[test]
    fn report_row_conversion_preserves_feedback_error() {
        let report = TaskStatusReport::new(
            TaskId::new(),
            UserId::new(),
            "Halfway there",
            Progress::new(50).expect("valid progress"),
            &DefaultClock,
        )
        .expect("valid report")
        .with_feedback_error("feedback generation is disabled");

        let restored = row_to_report(to_row(&report)).expect("report conversion");

        assert_eq!(restored, report);
    }

    #[test]
    fn out_of_range_progress_is_rejected() {
        let report = TaskStatusReport::new(
            TaskId::new(),
            UserId::new(),
            "Done",
            Progress::new(100).expect("valid progress"),
            &DefaultClock,
        )
        .expect("valid report");
        let mut row = to_row(&report);
        row.progress = 140;

        assert!(row_to_report(row).is_err());
    }
}
