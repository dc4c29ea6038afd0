//! `PostgreSQL` repository implementation for leave requests.

use super::{models::LeaveRequestRow, schema::leave_requests};
use crate::identity::domain::{ProfileId, UserId};
use crate::leave::{
    domain::{LeavePeriod, LeaveRequest, LeaveRequestId, LeaveStatus, PersistedLeaveRequestData},
    ports::{LeaveRepository, LeaveRepositoryError, LeaveRepositoryResult},
};
use crate::postgres::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed leave repository.
#[derive(Debug, Clone)]
pub struct PostgresLeaveRepository {
    pool: PgPool,
}

impl PostgresLeaveRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> LeaveRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LeaveRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(LeaveRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(LeaveRepositoryError::persistence)?
    }
}

impl From<DieselError> for LeaveRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl LeaveRepository for PostgresLeaveRepository {
    async fn store(&self, request: &LeaveRequest) -> LeaveRepositoryResult<()> {
        let request_id = request.id();
        let row = to_row(request);
        self.run_blocking(move |connection| {
            diesel::insert_into(leave_requests::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        LeaveRepositoryError::DuplicateRequest(request_id)
                    }
                    other => LeaveRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, request: &LeaveRequest) -> LeaveRepositoryResult<()> {
        let request_id = request.id();
        let row = to_row(request);
        self.run_blocking(move |connection| {
            let updated = diesel::update(leave_requests::table.find(row.id))
                .set(&row)
                .execute(connection)?;
            if updated == 0 {
                return Err(LeaveRepositoryError::NotFound(request_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: LeaveRequestId) -> LeaveRepositoryResult<Option<LeaveRequest>> {
        self.run_blocking(move |connection| {
            let row = leave_requests::table
                .find(id.into_inner())
                .select(LeaveRequestRow::as_select())
                .first::<LeaveRequestRow>(connection)
                .optional()?;
            row.map(row_to_request).transpose()
        })
        .await
    }

    async fn list_for_employee(
        &self,
        employee: ProfileId,
    ) -> LeaveRepositoryResult<Vec<LeaveRequest>> {
        self.run_blocking(move |connection| {
            let rows = leave_requests::table
                .filter(leave_requests::employee_profile_id.eq(employee.into_inner()))
                .order(leave_requests::created_at.desc())
                .select(LeaveRequestRow::as_select())
                .load::<LeaveRequestRow>(connection)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }

    async fn list_all(&self) -> LeaveRepositoryResult<Vec<LeaveRequest>> {
        self.run_blocking(move |connection| {
            let rows = leave_requests::table
                .order(leave_requests::created_at.desc())
                .select(LeaveRequestRow::as_select())
                .load::<LeaveRequestRow>(connection)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }
}

fn to_row(request: &LeaveRequest) -> LeaveRequestRow {
    let period = request.period();
    LeaveRequestRow {
        id: request.id().into_inner(),
        employee_profile_id: request.employee_profile_id().into_inner(),
        start_date: period.start(),
        end_date: period.end(),
        reason: request.reason().to_owned(),
        status: request.status().as_str().to_owned(),
        approved_by: request.approved_by().map(UserId::into_inner),
        approval_date: request.approval_date(),
        tasks_transferred: request.tasks_transferred(),
        transfer_successful: request.transfer_successful(),
        created_at: request.created_at(),
    }
}

fn row_to_request(row: LeaveRequestRow) -> LeaveRepositoryResult<LeaveRequest> {
    let status =
        LeaveStatus::try_from(row.status.as_str()).map_err(LeaveRepositoryError::persistence)?;
    let period =
        LeavePeriod::new(row.start_date, row.end_date).map_err(LeaveRepositoryError::persistence)?;
    Ok(LeaveRequest::from_persisted(PersistedLeaveRequestData {
        id: LeaveRequestId::from_uuid(row.id),
        employee_profile_id: ProfileId::from_uuid(row.employee_profile_id),
        period,
        reason: row.reason,
        status,
        approved_by: row.approved_by.map(UserId::from_uuid),
        approval_date: row.approval_date,
        tasks_transferred: row.tasks_transferred,
        transfer_successful: row.transfer_successful,
        created_at: row.created_at,
    }))
}
