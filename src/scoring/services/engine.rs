//! Score recomputation, rankings, aggregates and the leave-score penalty.

use crate::config::ScoringPolicy;
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Actor, EmployeeProfile, UserId},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use crate::locks::EmployeeLocks;
use crate::scoring::domain::{
    CallerStats, Dashboard, LeaderboardEntry, PerformanceSummary, ScoreCard, TaskBreakdown,
    TeamStats, round2,
};
use crate::task::{
    domain::TaskStatus,
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Length of the trailing window used by [`ScoringService::user_performance`].
pub const PERFORMANCE_WINDOW_DAYS: i64 = 30;

const NOT_COMPLETED: [TaskStatus; 4] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Failed,
    TaskStatus::Transferred,
];

/// Service-level errors for scoring operations.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Profile lookup or write failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
    /// The user has no profile of the required kind.
    #[error("no profile found for user {0}")]
    ProfileNotFound(UserId),
    /// The caller may not perform the operation.
    #[error("user {user_id} may not {action}")]
    Forbidden {
        /// Calling user.
        user_id: UserId,
        /// Attempted operation.
        action: &'static str,
    },
}

impl ScoringError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProfileNotFound(_)
            | Self::Tasks(TaskRepositoryError::NotFound(_))
            | Self::Profiles(ProfileRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Tasks(TaskRepositoryError::DuplicateTask(_))
            | Self::Profiles(ProfileRepositoryError::DuplicateUser(_)) => ErrorKind::Validation,
            Self::Tasks(TaskRepositoryError::Persistence(_))
            | Self::Profiles(ProfileRepositoryError::Persistence(_)) => ErrorKind::Persistence,
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

/// Result type for scoring operations.
pub type ScoringResult<T> = Result<T, ScoringError>;

/// The scoring engine.
///
/// Employee performance fields are only ever written by
/// [`ScoringService::calculate_employee_score`]; the leave score only by
/// [`ScoringService::update_leave_score`] and the leave workflow's locked
/// call into the same path. Every write holds the employee's advisory lock
/// for the whole read-modify-write.
#[derive(Clone)]
pub struct ScoringService<T, P, C>
where
    T: TaskRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    profiles: Arc<P>,
    clock: Arc<C>,
    locks: Arc<EmployeeLocks>,
    policy: ScoringPolicy,
}

impl<T, P, C> ScoringService<T, P, C>
where
    T: TaskRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a scoring engine sharing `locks` with the transfer workflow.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        profiles: Arc<P>,
        clock: Arc<C>,
        locks: Arc<EmployeeLocks>,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            tasks,
            profiles,
            clock,
            locks,
            policy,
        }
    }

    /// Returns the advisory lock registry shared with the transfer workflow.
    #[must_use]
    pub const fn locks(&self) -> &Arc<EmployeeLocks> {
        &self.locks
    }

    /// Returns the active scoring policy.
    #[must_use]
    pub const fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Recomputes and persists an employee's performance fields.
    ///
    /// Idempotent: without task changes in between, repeated calls write
    /// identical values.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::ProfileNotFound`] when `employee` has no
    /// employee profile, or a repository error.
    pub async fn calculate_employee_score(&self, employee: UserId) -> ScoringResult<u64> {
        let _guard = self.locks.acquire(employee).await;
        let profile = self.recompute(employee).await?;
        Ok(profile.score())
    }

    /// Recomputes every employee. Managers only.
    ///
    /// Returns `(user, new score)` pairs in user ID order.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Forbidden`] for non-managers or the first
    /// repository error encountered.
    pub async fn recalculate_all(&self, actor: &Actor) -> ScoringResult<Vec<(UserId, u64)>> {
        if !actor.is_manager() {
            return Err(ScoringError::forbidden(actor, "recalculate scores"));
        }
        let employees = self.profiles.list_employees().await?;
        let mut scores = Vec::with_capacity(employees.len());
        for employee in employees {
            let user_id = employee.user_id();
            scores.push((user_id, self.calculate_employee_score(user_id).await?));
        }
        info!(employees = scores.len(), "recalculated all employee scores");
        Ok(scores)
    }

    /// Returns up to `limit` employees ranked by score. Managers only.
    ///
    /// Ties are broken by ascending user ID.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Forbidden`] for non-managers or a repository
    /// error.
    pub async fn leaderboard(
        &self,
        actor: &Actor,
        limit: usize,
    ) -> ScoringResult<Vec<LeaderboardEntry>> {
        if !actor.is_manager() {
            return Err(ScoringError::forbidden(actor, "view the leaderboard"));
        }
        let profiles = self.profiles.list_employees().await?;
        Ok(LeaderboardEntry::rank_profiles(profiles, limit))
    }

    /// Returns team aggregates. Managers only.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Forbidden`] for non-managers or a repository
    /// error.
    pub async fn team_stats(&self, actor: &Actor) -> ScoringResult<TeamStats> {
        if !actor.is_manager() {
            return Err(ScoringError::forbidden(actor, "view team statistics"));
        }
        self.compute_team_stats().await
    }

    /// Applies the leave penalty unless the employee's work was transferred.
    ///
    /// The leave score never increases here and stops at zero. Returns the
    /// resulting leave score.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::ProfileNotFound`] or a repository error.
    pub async fn update_leave_score(
        &self,
        employee: UserId,
        transferred: bool,
    ) -> ScoringResult<u32> {
        let _guard = self.locks.acquire(employee).await;
        self.update_leave_score_locked(employee, transferred).await
    }

    /// Applies the leave penalty. The caller must hold the employee's lock.
    pub(crate) async fn update_leave_score_locked(
        &self,
        employee: UserId,
        transferred: bool,
    ) -> ScoringResult<u32> {
        let mut profile = self.employee_profile(employee).await?;
        if transferred {
            debug!(employee = %employee, "work transferred; leave score unchanged");
            return Ok(profile.leave_score());
        }

        let before = profile.leave_score();
        let after = profile.apply_leave_penalty(self.policy.leave_penalty);
        self.profiles.update_employee(&profile).await?;
        info!(
            employee = %employee,
            before,
            after,
            penalty = self.policy.leave_penalty,
            "leave approved without transfer; leave score penalised"
        );
        Ok(after)
    }

    /// Returns task counts for the caller's scope.
    ///
    /// Managers see every task plus team statistics; employees see their
    /// own tasks only.
    ///
    /// # Errors
    ///
    /// Returns a repository error.
    pub async fn dashboard(&self, actor: &Actor) -> ScoringResult<Dashboard> {
        let scope = if actor.is_manager() {
            TaskFilter::all()
        } else {
            TaskFilter::all().assigned_to(actor.user_id())
        };
        let now = self.clock.utc();
        let tasks = TaskBreakdown {
            total: self.tasks.count(&scope).await?,
            completed: self
                .tasks
                .count(&scope.clone().with_statuses(&[TaskStatus::Completed]))
                .await?,
            in_progress: self
                .tasks
                .count(&scope.clone().with_statuses(&[TaskStatus::InProgress]))
                .await?,
            pending: self
                .tasks
                .count(&scope.clone().with_statuses(&[TaskStatus::Pending]))
                .await?,
            overdue: self
                .tasks
                .count(&scope.with_statuses(&NOT_COMPLETED).due_before(now))
                .await?,
        };
        let team = if actor.is_manager() {
            Some(self.compute_team_stats().await?)
        } else {
            None
        };
        Ok(Dashboard { tasks, team })
    }

    /// Summarises a user's tasks created in the last
    /// [`PERFORMANCE_WINDOW_DAYS`] days.
    ///
    /// Managers may name any `target`; employees always get their own
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::ProfileNotFound`] when the subject has no
    /// profile, or a repository error.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "completion rate is a percentage of task counts"
    )]
    pub async fn user_performance(
        &self,
        actor: &Actor,
        target: Option<UserId>,
    ) -> ScoringResult<PerformanceSummary> {
        let subject = match target {
            Some(requested) if actor.is_manager() => requested,
            _ => actor.user_id(),
        };
        let (name, score) = self.display_profile(subject).await?;

        let now = self.clock.utc();
        let since = now - Duration::days(PERFORMANCE_WINDOW_DAYS);
        let recent = self
            .tasks
            .find(&TaskFilter::all().assigned_to(subject).created_since(since))
            .await?;

        let total_tasks = recent.len() as u64;
        let completed_tasks = recent
            .iter()
            .filter(|task| task.status() == TaskStatus::Completed)
            .count() as u64;
        let overdue_tasks = recent.iter().filter(|task| task.is_overdue(now)).count() as u64;
        let completion_rate = if total_tasks == 0 {
            0.0
        } else {
            round2(completed_tasks as f64 / total_tasks as f64 * 100.0)
        };

        Ok(PerformanceSummary {
            user_id: subject,
            name,
            total_tasks,
            completed_tasks,
            overdue_tasks,
            completion_rate,
            score,
        })
    }

    /// Returns the caller's own profile, recomputing employees first.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::ProfileNotFound`] when the caller has no
    /// profile, or a repository error.
    pub async fn employee_stats(&self, actor: &Actor) -> ScoringResult<CallerStats> {
        let user_id = actor.user_id();
        if actor.is_manager() {
            return self
                .profiles
                .find_manager_by_user(user_id)
                .await?
                .map(CallerStats::Manager)
                .ok_or(ScoringError::ProfileNotFound(user_id));
        }
        let _guard = self.locks.acquire(user_id).await;
        let profile = self.recompute(user_id).await?;
        Ok(CallerStats::Employee(profile))
    }

    /// Recomputes one employee. The caller must hold the employee's lock.
    async fn recompute(&self, employee: UserId) -> ScoringResult<EmployeeProfile> {
        let mut profile = self.employee_profile(employee).await?;
        let terminal = self
            .tasks
            .find(
                &TaskFilter::all()
                    .assigned_to(employee)
                    .with_statuses(&[TaskStatus::Completed, TaskStatus::Failed]),
            )
            .await?;
        let card = ScoreCard::tally(&terminal);
        profile.record_performance(card.performance(self.policy.failure_weight));
        self.profiles.update_employee(&profile).await?;
        debug!(
            employee = %employee,
            score = profile.score(),
            completed = card.completed(),
            failed = card.failed(),
            "employee score recomputed"
        );
        Ok(profile)
    }

    async fn compute_team_stats(&self) -> ScoringResult<TeamStats> {
        let profiles = self.profiles.list_employees().await?;
        if profiles.is_empty() {
            return Ok(TeamStats::default());
        }
        let completed = self
            .tasks
            .count(&TaskFilter::all().with_statuses(&[TaskStatus::Completed]))
            .await?;
        let open = self
            .tasks
            .count(&TaskFilter::all().with_statuses(&TaskStatus::OPEN))
            .await?;
        Ok(TeamStats::from_profiles(&profiles, completed, open))
    }

    async fn employee_profile(&self, employee: UserId) -> ScoringResult<EmployeeProfile> {
        self.profiles
            .find_employee_by_user(employee)
            .await?
            .ok_or(ScoringError::ProfileNotFound(employee))
    }

    async fn display_profile(&self, user_id: UserId) -> ScoringResult<(String, u64)> {
        if let Some(employee) = self.profiles.find_employee_by_user(user_id).await? {
            return Ok((employee.name().to_owned(), employee.score()));
        }
        self.profiles
            .find_manager_by_user(user_id)
            .await?
            .map(|manager| (manager.name().to_owned(), 0))
            .ok_or(ScoringError::ProfileNotFound(user_id))
    }
}
