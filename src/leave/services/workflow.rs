//! Leave filing, task transfer and the approval decision.

use crate::config::TransferMode;
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Actor, EmployeeProfile, ProfileId, UserId},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use crate::leave::{
    domain::{LeaveDomainError, LeavePeriod, LeaveRequest, LeaveRequestId},
    ports::{LeaveRepository, LeaveRepositoryError},
};
use crate::scoring::services::{ScoringError, ScoringService};
use crate::task::{
    domain::{Task, TaskDomainError, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for the leave workflow.
#[derive(Debug, Error)]
pub enum LeaveWorkflowError {
    /// Leave request validation or state machine failure.
    #[error(transparent)]
    Domain(#[from] LeaveDomainError),
    /// A task could not be moved.
    #[error(transparent)]
    TaskDomain(#[from] TaskDomainError),
    /// Leave persistence failed.
    #[error(transparent)]
    Leaves(#[from] LeaveRepositoryError),
    /// Task persistence failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Profile lookup failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
    /// The leave penalty could not be applied.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    /// The leave request does not exist.
    #[error("leave request not found: {0}")]
    NotFound(LeaveRequestId),
    /// The user has no employee profile.
    #[error("no employee profile found for user {0}")]
    ProfileNotFound(UserId),
    /// The profile owning a leave request no longer exists.
    #[error("employee profile not found: {0}")]
    OwnerNotFound(ProfileId),
    /// Work may not be transferred to the employee going on leave.
    #[error("cannot transfer tasks of user {0} to themselves")]
    SelfTransfer(UserId),
    /// The caller may not perform the operation.
    #[error("user {user_id} may not {action}")]
    Forbidden {
        /// Calling user.
        user_id: UserId,
        /// Attempted operation.
        action: &'static str,
    },
}

impl LeaveWorkflowError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) if err.is_transition_error() => ErrorKind::InvalidTransition,
            Self::TaskDomain(err) if err.is_transition_error() => ErrorKind::InvalidTransition,
            Self::Domain(_) | Self::TaskDomain(_) | Self::SelfTransfer(_) => ErrorKind::Validation,
            Self::Leaves(LeaveRepositoryError::DuplicateRequest(_))
            | Self::Tasks(TaskRepositoryError::DuplicateTask(_))
            | Self::Profiles(ProfileRepositoryError::DuplicateUser(_)) => ErrorKind::Validation,
            Self::NotFound(_)
            | Self::ProfileNotFound(_)
            | Self::OwnerNotFound(_)
            | Self::Leaves(LeaveRepositoryError::NotFound(_))
            | Self::Tasks(TaskRepositoryError::NotFound(_))
            | Self::Profiles(ProfileRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Leaves(LeaveRepositoryError::Persistence(_))
            | Self::Tasks(TaskRepositoryError::Persistence(_))
            | Self::Profiles(ProfileRepositoryError::Persistence(_)) => ErrorKind::Persistence,
            Self::Scoring(err) => err.kind(),
            Self::Forbidden { .. } => ErrorKind::Forbidden,
        }
    }

    const fn forbidden(actor: &Actor, action: &'static str) -> Self {
        Self::Forbidden {
            user_id: actor.user_id(),
            action,
        }
    }
}

/// Result type for leave workflow operations.
pub type LeaveWorkflowResult<T> = Result<T, LeaveWorkflowError>;

/// Orchestrates leave requests, the transfer of open work and the leave
/// penalty.
///
/// Transfers hold the advisory locks of both employees involved, shared
/// with the scoring engine and the task service, for the whole
/// read-modify-write of their tasks. Decisions hold the owner's lock, so a
/// transfer and a decision on the same request never interleave.
#[derive(Clone)]
pub struct LeaveWorkflowService<L, T, P, C>
where
    L: LeaveRepository,
    T: TaskRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    leaves: Arc<L>,
    tasks: Arc<T>,
    profiles: Arc<P>,
    scoring: Arc<ScoringService<T, P, C>>,
    clock: Arc<C>,
    transfer_mode: TransferMode,
}

impl<L, T, P, C> LeaveWorkflowService<L, T, P, C>
where
    L: LeaveRepository,
    T: TaskRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates the workflow on top of a scoring engine sharing the same
    /// task and profile stores.
    #[must_use]
    pub const fn new(
        leaves: Arc<L>,
        tasks: Arc<T>,
        profiles: Arc<P>,
        scoring: Arc<ScoringService<T, P, C>>,
        clock: Arc<C>,
        transfer_mode: TransferMode,
    ) -> Self {
        Self {
            leaves,
            tasks,
            profiles,
            scoring,
            clock,
            transfer_mode,
        }
    }

    /// Files a pending leave request for the calling employee.
    ///
    /// When the employee has no open tasks the request is marked as
    /// needing no transfer.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveWorkflowError::Forbidden`] for managers,
    /// [`LeaveWorkflowError::ProfileNotFound`] without an employee profile,
    /// or a validation error for an empty period or reason.
    pub async fn file_leave_request(
        &self,
        actor: &Actor,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        reason: &str,
    ) -> LeaveWorkflowResult<LeaveRequest> {
        if actor.is_manager() {
            return Err(LeaveWorkflowError::forbidden(actor, "file leave requests"));
        }
        let employee = actor.user_id();
        let profile = self.employee_profile(employee).await?;
        let period = LeavePeriod::new(start, end)?;
        let open_tasks = self.tasks.count(&open_tasks_of(employee)).await?;

        let request = LeaveRequest::file(profile.id(), period, reason, open_tasks, &*self.clock)?;
        self.leaves.store(&request).await?;
        info!(
            leave_id = %request.id(),
            employee = %employee,
            open_tasks,
            "leave request filed"
        );
        Ok(request)
    }

    /// Lists leave requests visible to `actor`, newest first.
    ///
    /// Employees without a profile get an empty list.
    ///
    /// # Errors
    ///
    /// Returns a repository error.
    pub async fn list_leave_requests(&self, actor: &Actor) -> LeaveWorkflowResult<Vec<LeaveRequest>> {
        if actor.is_manager() {
            return Ok(self.leaves.list_all().await?);
        }
        let Some(profile) = self.profiles.find_employee_by_user(actor.user_id()).await? else {
            return Ok(Vec::new());
        };
        Ok(self.leaves.list_for_employee(profile.id()).await?)
    }

    /// Reassigns every currently open task of the employee on leave to
    /// `target`. Managers only.
    ///
    /// Open tasks are re-derived at call time. Returns the number of tasks
    /// moved; moving none marks the transfer as unsuccessful. The request is
    /// re-read once both employees' locks are held, and the moved tasks are
    /// restored if its transfer flags cannot be written.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveWorkflowError::Forbidden`] for non-managers,
    /// [`LeaveWorkflowError::NotFound`] for an unknown request,
    /// [`LeaveDomainError::AlreadyDecided`] once decided,
    /// [`LeaveWorkflowError::ProfileNotFound`] when `target` is not an
    /// employee, or [`LeaveWorkflowError::SelfTransfer`].
    pub async fn transfer_tasks(
        &self,
        actor: &Actor,
        leave_id: LeaveRequestId,
        target: UserId,
    ) -> LeaveWorkflowResult<usize> {
        if !actor.is_manager() {
            return Err(LeaveWorkflowError::forbidden(actor, "transfer tasks"));
        }
        let filed = self.find_request(leave_id).await?;
        filed.ensure_pending()?;
        let owner = self.owner_of(&filed).await?;
        let employee = owner.user_id();
        if employee == target {
            return Err(LeaveWorkflowError::SelfTransfer(target));
        }
        self.employee_profile(target).await?;

        let _guard = self.scoring.locks().acquire_many([employee, target]).await;
        let mut request = self.find_request(leave_id).await?;
        request.ensure_pending()?;
        let original = self.tasks.find(&open_tasks_of(employee)).await?;
        let mut moved_tasks = original.clone();
        let now = &*self.clock;
        for task in &mut moved_tasks {
            task.transfer_to(target, self.transfer_mode, now)?;
        }
        let moved = moved_tasks.len();
        request.record_transfer(moved)?;

        self.tasks.update_all(&moved_tasks).await?;
        if let Err(err) = self.leaves.update(&request).await {
            self.restore_tasks(leave_id, &original).await;
            return Err(err.into());
        }
        info!(
            leave_id = %leave_id,
            employee = %employee,
            target = %target,
            moved,
            mode = %self.transfer_mode,
            "open tasks transferred"
        );
        Ok(moved)
    }

    /// Approves or rejects a pending request. Managers only.
    ///
    /// Approving a request whose work was never handed over applies the
    /// leave penalty through the scoring engine. The decision and the
    /// penalty run under the owner's lock; if the penalty cannot be
    /// applied the request is returned to `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveWorkflowError::Forbidden`] for non-managers,
    /// [`LeaveWorkflowError::NotFound`] for an unknown request, or
    /// [`LeaveDomainError::AlreadyDecided`] once decided.
    pub async fn decide(
        &self,
        actor: &Actor,
        leave_id: LeaveRequestId,
        approved: bool,
    ) -> LeaveWorkflowResult<LeaveRequest> {
        if !actor.is_manager() {
            return Err(LeaveWorkflowError::forbidden(actor, "decide leave requests"));
        }
        let filed = self.find_request(leave_id).await?;
        filed.ensure_pending()?;
        let owner = self.owner_of(&filed).await?;
        let employee = owner.user_id();

        let _guard = self.scoring.locks().acquire(employee).await;
        let pending = self.find_request(leave_id).await?;
        let mut request = pending.clone();
        request.decide(approved, actor.user_id(), &*self.clock)?;
        self.leaves.update(&request).await?;

        if request.requires_leave_penalty() {
            if let Err(err) = self
                .scoring
                .update_leave_score_locked(employee, request.transfer_successful())
                .await
            {
                self.restore_request(&pending).await;
                return Err(err.into());
            }
        } else {
            debug!(leave_id = %leave_id, "no leave penalty due");
        }
        info!(
            leave_id = %leave_id,
            status = %request.status(),
            decided_by = %actor.user_id(),
            "leave request decided"
        );
        Ok(request)
    }

    async fn restore_tasks(&self, leave_id: LeaveRequestId, original: &[Task]) {
        if let Err(err) = self.tasks.update_all(original).await {
            warn!(leave_id = %leave_id, error = %err, "failed to restore transferred tasks");
        }
    }

    async fn restore_request(&self, pending: &LeaveRequest) {
        if let Err(err) = self.leaves.update(pending).await {
            warn!(leave_id = %pending.id(), error = %err, "failed to restore pending leave request");
        }
    }

    async fn find_request(&self, leave_id: LeaveRequestId) -> LeaveWorkflowResult<LeaveRequest> {
        self.leaves
            .find_by_id(leave_id)
            .await?
            .ok_or(LeaveWorkflowError::NotFound(leave_id))
    }

    async fn owner_of(&self, request: &LeaveRequest) -> LeaveWorkflowResult<EmployeeProfile> {
        let profile_id = request.employee_profile_id();
        self.profiles
            .find_employee_by_id(profile_id)
            .await?
            .ok_or(LeaveWorkflowError::OwnerNotFound(profile_id))
    }

    async fn employee_profile(&self, user_id: UserId) -> LeaveWorkflowResult<EmployeeProfile> {
        self.profiles
            .find_employee_by_user(user_id)
            .await?
            .ok_or(LeaveWorkflowError::ProfileNotFound(user_id))
    }
}

fn open_tasks_of(employee: UserId) -> TaskFilter {
    TaskFilter::all()
        .assigned_to(employee)
        .with_statuses(&TaskStatus::OPEN)
}
