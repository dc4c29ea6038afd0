//! `PostgreSQL` repository implementation for profile storage.

use super::{
    models::{EmployeeProfileRow, ManagerProfileRow},
    schema::{employee_profiles, manager_profiles},
};
use crate::identity::{
    domain::{
        EmployeeProfile, ManagerProfile, PerformanceRecord, PersistedEmployeeProfileData,
        PersistedManagerProfileData, ProfileId, UserId,
    },
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use crate::postgres::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

impl From<DieselError> for ProfileRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store_employee(&self, profile: &EmployeeProfile) -> ProfileRepositoryResult<()> {
        let user_id = profile.user_id();
        let row = to_employee_row(profile)?;
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                ensure_no_profile(tx, user_id)?;
                diesel::insert_into(employee_profiles::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| map_insert_error(err, user_id))?;
                Ok(())
            })
        })
        .await
    }

    async fn update_employee(&self, profile: &EmployeeProfile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let row = to_employee_row(profile)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                employee_profiles::table.filter(employee_profiles::id.eq(row.id)),
            )
            .set((
                employee_profiles::name.eq(&row.name),
                employee_profiles::position.eq(&row.position),
                employee_profiles::score.eq(row.score),
                employee_profiles::leave_score.eq(row.leave_score),
                employee_profiles::success_rate.eq(row.success_rate),
                employee_profiles::tasks_completed.eq(row.tasks_completed),
                employee_profiles::tasks_failed.eq(row.tasks_failed),
            ))
            .execute(connection)?;
            if updated == 0 {
                return Err(ProfileRepositoryError::NotFound(profile_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_employee_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<EmployeeProfile>> {
        self.run_blocking(move |connection| {
            let row = employee_profiles::table
                .filter(employee_profiles::user_id.eq(user_id.into_inner()))
                .select(EmployeeProfileRow::as_select())
                .first::<EmployeeProfileRow>(connection)
                .optional()?;
            row.map(row_to_employee).transpose()
        })
        .await
    }

    async fn find_employee_by_id(
        &self,
        id: ProfileId,
    ) -> ProfileRepositoryResult<Option<EmployeeProfile>> {
        self.run_blocking(move |connection| {
            let row = employee_profiles::table
                .filter(employee_profiles::id.eq(id.into_inner()))
                .select(EmployeeProfileRow::as_select())
                .first::<EmployeeProfileRow>(connection)
                .optional()?;
            row.map(row_to_employee).transpose()
        })
        .await
    }

    async fn list_employees(&self) -> ProfileRepositoryResult<Vec<EmployeeProfile>> {
        self.run_blocking(move |connection| {
            let rows = employee_profiles::table
                .order(employee_profiles::user_id.asc())
                .select(EmployeeProfileRow::as_select())
                .load::<EmployeeProfileRow>(connection)?;
            rows.into_iter().map(row_to_employee).collect()
        })
        .await
    }

    async fn store_manager(&self, profile: &ManagerProfile) -> ProfileRepositoryResult<()> {
        let user_id = profile.user_id();
        let row = to_manager_row(profile)?;
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                ensure_no_profile(tx, user_id)?;
                diesel::insert_into(manager_profiles::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| map_insert_error(err, user_id))?;
                Ok(())
            })
        })
        .await
    }

    async fn find_manager_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<ManagerProfile>> {
        self.run_blocking(move |connection| {
            let row = manager_profiles::table
                .filter(manager_profiles::user_id.eq(user_id.into_inner()))
                .select(ManagerProfileRow::as_select())
                .first::<ManagerProfileRow>(connection)
                .optional()?;
            row.map(row_to_manager).transpose()
        })
        .await
    }
}

/// Rejects a second profile for the same user across both profile tables.
fn ensure_no_profile(connection: &mut PgConnection, user_id: UserId) -> ProfileRepositoryResult<()> {
    let uuid = user_id.into_inner();
    let employees: i64 = employee_profiles::table
        .filter(employee_profiles::user_id.eq(uuid))
        .count()
        .get_result(connection)?;
    let managers: i64 = manager_profiles::table
        .filter(manager_profiles::user_id.eq(uuid))
        .count()
        .get_result(connection)?;
    if employees > 0 || managers > 0 {
        return Err(ProfileRepositoryError::DuplicateUser(user_id));
    }
    Ok(())
}

fn map_insert_error(err: DieselError, user_id: UserId) -> ProfileRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ProfileRepositoryError::DuplicateUser(user_id)
        }
        other => ProfileRepositoryError::persistence(other),
    }
}

pub(super) fn to_employee_row(
    profile: &EmployeeProfile,
) -> ProfileRepositoryResult<EmployeeProfileRow> {
    Ok(EmployeeProfileRow {
        id: profile.id().into_inner(),
        user_id: profile.user_id().into_inner(),
        name: profile.name().to_owned(),
        position: profile.position().map(str::to_owned),
        score: i64::try_from(profile.score()).map_err(ProfileRepositoryError::persistence)?,
        leave_score: i32::try_from(profile.leave_score())
            .map_err(ProfileRepositoryError::persistence)?,
        success_rate: profile.success_rate(),
        tasks_completed: i32::try_from(profile.tasks_completed())
            .map_err(ProfileRepositoryError::persistence)?,
        tasks_failed: i32::try_from(profile.tasks_failed())
            .map_err(ProfileRepositoryError::persistence)?,
    })
}

pub(super) fn row_to_employee(row: EmployeeProfileRow) -> ProfileRepositoryResult<EmployeeProfile> {
    let EmployeeProfileRow {
        id,
        user_id,
        name,
        position,
        score,
        leave_score,
        success_rate,
        tasks_completed,
        tasks_failed,
    } = row;

    let performance = PerformanceRecord {
        score: u64::try_from(score).map_err(ProfileRepositoryError::persistence)?,
        success_rate,
        tasks_completed: u32::try_from(tasks_completed)
            .map_err(ProfileRepositoryError::persistence)?,
        tasks_failed: u32::try_from(tasks_failed).map_err(ProfileRepositoryError::persistence)?,
    };
    Ok(EmployeeProfile::from_persisted(PersistedEmployeeProfileData {
        id: ProfileId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        name,
        position,
        performance,
        leave_score: u32::try_from(leave_score).map_err(ProfileRepositoryError::persistence)?,
    }))
}

fn to_manager_row(profile: &ManagerProfile) -> ProfileRepositoryResult<ManagerProfileRow> {
    Ok(ManagerProfileRow {
        id: profile.id().into_inner(),
        user_id: profile.user_id().into_inner(),
        name: profile.name().to_owned(),
        salary: profile.salary(),
        projects_count: i32::try_from(profile.projects_count())
            .map_err(ProfileRepositoryError::persistence)?,
        success_rate: profile.success_rate(),
        team_size: i32::try_from(profile.team_size())
            .map_err(ProfileRepositoryError::persistence)?,
    })
}

fn row_to_manager(row: ManagerProfileRow) -> ProfileRepositoryResult<ManagerProfile> {
    Ok(ManagerProfile::from_persisted(PersistedManagerProfileData {
        id: ProfileId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        name: row.name,
        salary: row.salary,
        projects_count: u32::try_from(row.projects_count)
            .map_err(ProfileRepositoryError::persistence)?,
        success_rate: row.success_rate,
        team_size: u32::try_from(row.team_size).map_err(ProfileRepositoryError::persistence)?,
    }))
}
