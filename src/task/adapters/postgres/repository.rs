//! `PostgreSQL` repository implementation for task storage.

use super::{models::TaskRow, schema::tasks};
use crate::identity::domain::UserId;
use crate::postgres::PgPool;
use crate::task::{
    domain::{PersistedTaskData, ScoreValue, Task, TaskId, TaskPriority, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = to_row(task)?;
        self.run_blocking(move |connection| update_row(connection, &row))
            .await
    }

    async fn update_all(&self, updated: &[Task]) -> TaskRepositoryResult<()> {
        let rows = updated
            .iter()
            .map(to_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        self.run_blocking(move |connection| {
            connection.transaction(|tx| rows.iter().try_for_each(|row| update_row(tx, row)))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = filtered(&criteria)
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select());
            if let Some(page) = criteria.page {
                query = query
                    .offset(i64::try_from(page.offset).map_err(TaskRepositoryError::persistence)?)
                    .limit(i64::try_from(page.limit).map_err(TaskRepositoryError::persistence)?);
            }
            let rows = query.load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let total: i64 = filtered(&criteria)
                .select(diesel::dsl::count_star())
                .get_result(connection)?;
            u64::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Builds a boxed query applying every set filter criterion.
fn filtered(filter: &TaskFilter) -> tasks::BoxedQuery<'static, Pg> {
    let mut query = tasks::table.into_boxed();
    if let Some(assignee) = filter.assignee {
        query = query.filter(tasks::assigned_to.eq(assignee.into_inner()));
    }
    if !filter.statuses.is_empty() {
        let statuses: Vec<&'static str> =
            filter.statuses.iter().map(|status| status.as_str()).collect();
        query = query.filter(tasks::status.eq_any(statuses));
    }
    if let Some(since) = filter.created_since {
        query = query.filter(tasks::created_at.ge(since));
    }
    if let Some(instant) = filter.due_before {
        query = query.filter(tasks::due_date.lt(instant));
    }
    query
}

fn update_row(connection: &mut PgConnection, row: &TaskRow) -> TaskRepositoryResult<()> {
    let updated = diesel::update(tasks::table.find(row.id))
        .set(row)
        .execute(connection)?;
    if updated == 0 {
        return Err(TaskRepositoryError::NotFound(TaskId::from_uuid(row.id)));
    }
    Ok(())
}

pub(super) fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        created_by: task.created_by().into_inner(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        score_value: i32::try_from(task.score_value().value())
            .map_err(TaskRepositoryError::persistence)?,
        estimated_hours: task.estimated_hours(),
        actual_hours: task.actual_hours(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    })
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        assigned_to,
        created_by,
        status,
        priority,
        score_value,
        estimated_hours,
        actual_hours,
        due_date,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let parsed_status =
        TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let parsed_priority =
        TaskPriority::try_from(priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let weight = u32::try_from(score_value).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        assigned_to: assigned_to.map(UserId::from_uuid),
        created_by: UserId::from_uuid(created_by),
        status: parsed_status,
        priority: parsed_priority,
        score_value: ScoreValue::new(weight).map_err(TaskRepositoryError::persistence)?,
        estimated_hours,
        actual_hours,
        due_date,
        created_at,
        updated_at,
        completed_at,
    }))
}
