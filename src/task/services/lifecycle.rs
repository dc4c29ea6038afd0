//! Service layer for task creation, lookup and status changes.

use crate::error::ErrorKind;
use crate::identity::domain::{Actor, UserId};
use crate::locks::EmployeeLocks;
use crate::task::{
    domain::{
        ScoreValue, Task, TaskDetailsUpdate, TaskDomainError, TaskDraft, TaskId, TaskPriority,
        TaskStatus,
    },
    ports::{Page, TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskRequest {
    title: String,
    description: Option<String>,
    assigned_to: Option<UserId>,
    priority: TaskPriority,
    score_value: Option<u32>,
    estimated_hours: Option<f64>,
    due_date: Option<DateTime<Utc>>,
}

impl NewTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            assigned_to: None,
            priority: TaskPriority::default(),
            score_value: None,
            estimated_hours: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn assigned_to(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the score weight; validated when the task is created.
    #[must_use]
    pub const fn with_score_value(mut self, score_value: u32) -> Self {
        self.score_value = Some(score_value);
        self
    }

    /// Sets the effort estimate.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let score_value = self
            .score_value
            .map(ScoreValue::new)
            .transpose()?
            .unwrap_or_default();
        Ok(TaskDraft {
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            priority: self.priority,
            score_value,
            estimated_hours: self.estimated_hours,
            due_date: self.due_date,
        })
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or state machine rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The caller may not perform the operation.
    #[error("user {user_id} may not {action}")]
    Forbidden {
        /// Calling user.
        user_id: UserId,
        /// Attempted operation.
        action: &'static str,
    },
}

impl TaskLifecycleError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) if err.is_transition_error() => ErrorKind::InvalidTransition,
            Self::Domain(_) | Self::Repository(TaskRepositoryError::DuplicateTask(_)) => {
                ErrorKind::Validation
            }
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(TaskRepositoryError::Persistence(_)) => ErrorKind::Persistence,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
        }
    }

    pub(crate) const fn forbidden(actor: &Actor, action: &'static str) -> Self {
        Self::Forbidden {
            user_id: actor.user_id(),
            action,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Status only changes through [`TaskLifecycleService::transition`]; there
/// is no path that writes an arbitrary status. Transitions and
/// reassignments hold the assignee's advisory lock, so sharing the registry
/// with the leave workflow keeps a transfer from overwriting them.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    locks: Arc<EmployeeLocks>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with a private lock registry.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            locks: Arc::new(EmployeeLocks::new()),
        }
    }

    /// Shares the advisory lock registry used by scoring and leave transfers.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<EmployeeLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Creates a pending task. Managers only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-managers and
    /// [`TaskLifecycleError::Domain`] when validation fails.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: NewTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        if !actor.is_manager() {
            return Err(TaskLifecycleError::forbidden(actor, "create tasks"));
        }
        let task = Task::create(request.into_draft()?, actor.user_id(), &*self.clock)?;
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            created_by = %actor.user_id(),
            score_value = task.score_value().value(),
            "task created"
        );
        Ok(task)
    }

    /// Returns a task the caller may read.
    ///
    /// Employees may only read tasks assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] or
    /// [`TaskLifecycleError::Forbidden`].
    pub async fn get_task(&self, actor: &Actor, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.load(id).await?;
        if !actor.is_manager_or(task.assigned_to()) {
            return Err(TaskLifecycleError::forbidden(actor, "read this task"));
        }
        Ok(task)
    }

    /// Lists tasks visible to the caller, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, actor: &Actor, page: Page) -> TaskLifecycleResult<Vec<Task>> {
        let mut filter = TaskFilter::all().paged(page);
        if !actor.is_manager() {
            filter = filter.assigned_to(actor.user_id());
        }
        Ok(self.repository.find(&filter).await?)
    }

    /// Updates descriptive fields. Assignee or manager only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`],
    /// [`TaskLifecycleError::Forbidden`] or a validation error.
    pub async fn update_details(
        &self,
        actor: &Actor,
        id: TaskId,
        update: TaskDetailsUpdate,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(id).await?;
        if !actor.is_manager_or(task.assigned_to()) {
            return Err(TaskLifecycleError::forbidden(actor, "edit this task"));
        }
        task.update_details(update, &*self.clock)?;
        self.repository.update(&task).await?;
        debug!(task_id = %id, "task details updated");
        Ok(task)
    }

    /// Moves a task along the status state machine.
    ///
    /// Only the assignee or a manager may transition a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`],
    /// [`TaskLifecycleError::Forbidden`], or a domain error classified as
    /// [`ErrorKind::InvalidTransition`] when `next` is unreachable.
    pub async fn transition(
        &self,
        actor: &Actor,
        id: TaskId,
        next: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let observed = self.load(id).await?;
        let _guard = self.locks.acquire_many(observed.assigned_to()).await;
        let mut task = self.load(id).await?;
        if !actor.is_manager_or(task.assigned_to()) {
            return Err(TaskLifecycleError::forbidden(actor, "change this task's status"));
        }
        let previous = task.status();
        task.transition_to(next, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(
            task_id = %id,
            actor = %actor.user_id(),
            from = %previous,
            to = %next,
            "task status changed"
        );
        Ok(task)
    }

    /// Reassigns an open task. Managers only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`],
    /// [`TaskLifecycleError::NotFound`] or an invalid-transition error when
    /// the task is closed.
    pub async fn assign(
        &self,
        actor: &Actor,
        id: TaskId,
        assignee: UserId,
    ) -> TaskLifecycleResult<Task> {
        if !actor.is_manager() {
            return Err(TaskLifecycleError::forbidden(actor, "assign tasks"));
        }
        let observed = self.load(id).await?;
        let _guard = self
            .locks
            .acquire_many(observed.assigned_to().into_iter().chain([assignee]))
            .await;
        let mut task = self.load(id).await?;
        task.assign(assignee, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %id, assignee = %assignee, "task assigned");
        Ok(task)
    }

    /// Deletes a task. Managers only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] or
    /// [`TaskLifecycleError::NotFound`].
    pub async fn delete_task(&self, actor: &Actor, id: TaskId) -> TaskLifecycleResult<()> {
        if !actor.is_manager() {
            return Err(TaskLifecycleError::forbidden(actor, "delete tasks"));
        }
        self.repository.delete(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskLifecycleError::NotFound(missing),
            other => other.into(),
        })?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }
}
