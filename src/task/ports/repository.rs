//! Repository port for task persistence and filtered lookup.

use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to several existing tasks atomically.
    ///
    /// Either every task is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when any task does not
    /// exist.
    async fn update_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks matching `filter`, oldest first.
    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts tasks matching `filter`. Paging is ignored.
    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64>;
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of matching rows to skip.
    pub offset: usize,
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl Page {
    /// Rows returned when no limit is given.
    pub const DEFAULT_LIMIT: usize = 100;

    /// Creates a page window.
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Conjunctive task query. Unset criteria match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks assigned to this user.
    pub assignee: Option<UserId>,
    /// Only tasks in one of these statuses; empty matches any status.
    pub statuses: Vec<TaskStatus>,
    /// Only tasks created at or after this instant.
    pub created_since: Option<DateTime<Utc>>,
    /// Only tasks with a due date strictly before this instant.
    pub due_before: Option<DateTime<Utc>>,
    /// Result window; `None` returns every match.
    pub page: Option<Page>,
}

impl TaskFilter {
    /// Returns a filter matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the filter to tasks assigned to `assignee`.
    #[must_use]
    pub const fn assigned_to(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Restricts the filter to the given statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: &[TaskStatus]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    /// Restricts the filter to tasks created at or after `since`.
    #[must_use]
    pub const fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    /// Restricts the filter to tasks due strictly before `instant`.
    #[must_use]
    pub const fn due_before(mut self, instant: DateTime<Utc>) -> Self {
        self.due_before = Some(instant);
        self
    }

    /// Limits the result window.
    #[must_use]
    pub const fn paged(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// Returns `true` when `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.assignee.is_none_or(|user| task.assigned_to() == Some(user))
            && (self.statuses.is_empty() || self.statuses.contains(&task.status()))
            && self
                .created_since
                .is_none_or(|since| task.created_at() >= since)
            && self
                .due_before
                .is_none_or(|instant| task.due_date().is_some_and(|due| due < instant))
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
