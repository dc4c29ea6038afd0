//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workforce::config::{ScoringPolicy, TransferMode};
use workforce::identity::{
    adapters::memory::InMemoryProfileRepository,
    domain::{Actor, UserId},
    services::{ProfileService, RegisterEmployeeRequest, RegisterManagerRequest},
};
use workforce::leave::{adapters::memory::InMemoryLeaveRepository, services::LeaveWorkflowService};
use workforce::locks::EmployeeLocks;
use workforce::scoring::services::ScoringService;
use workforce::task::{
    adapters::{
        feedback::DisabledFeedback,
        memory::{InMemoryStatusReportRepository, InMemoryTaskRepository},
    },
    domain::{Task, TaskStatus},
    services::{NewTaskRequest, StatusReportService, TaskLifecycleService},
};

/// Task service wired to in-memory storage.
pub type Tasks = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;
/// Reporting service without a feedback collaborator.
pub type Reports = StatusReportService<
    InMemoryTaskRepository,
    InMemoryStatusReportRepository,
    DisabledFeedback,
    DefaultClock,
>;
/// Scoring engine wired to in-memory storage.
pub type Scoring = ScoringService<InMemoryTaskRepository, InMemoryProfileRepository, DefaultClock>;
/// Leave workflow wired to in-memory storage.
pub type Leave = LeaveWorkflowService<
    InMemoryLeaveRepository,
    InMemoryTaskRepository,
    InMemoryProfileRepository,
    DefaultClock,
>;

/// Every service sharing one set of in-memory stores.
pub struct App {
    pub profiles: ProfileService<InMemoryProfileRepository>,
    pub tasks: Tasks,
    pub reports: Reports,
    pub scoring: Arc<Scoring>,
    pub leave: Leave,
}

/// Builds the application with default policies.
#[fixture]
pub fn app() -> App {
    let task_store = Arc::new(InMemoryTaskRepository::new());
    let profile_store = Arc::new(InMemoryProfileRepository::new());
    let clock = Arc::new(DefaultClock);
    let scoring = Arc::new(ScoringService::new(
        Arc::clone(&task_store),
        Arc::clone(&profile_store),
        Arc::clone(&clock),
        Arc::new(EmployeeLocks::new()),
        ScoringPolicy::default(),
    ));
    App {
        profiles: ProfileService::new(Arc::clone(&profile_store)),
        tasks: TaskLifecycleService::new(Arc::clone(&task_store), Arc::clone(&clock))
            .with_locks(Arc::clone(scoring.locks())),
        reports: StatusReportService::new(
            Arc::clone(&task_store),
            Arc::new(InMemoryStatusReportRepository::new()),
            Arc::new(DisabledFeedback),
            Arc::clone(&clock),
            std::time::Duration::from_millis(100),
        ),
        leave: LeaveWorkflowService::new(
            Arc::new(InMemoryLeaveRepository::new()),
            task_store,
            profile_store,
            Arc::clone(&scoring),
            clock,
            TransferMode::default(),
        ),
        scoring,
    }
}

impl App {
    /// Registers a manager profile and returns its caller context.
    pub async fn manager(&self, name: &str) -> eyre::Result<Actor> {
        let user_id = UserId::new();
        self.profiles
            .register_manager(RegisterManagerRequest::new(user_id, name))
            .await?;
        Ok(Actor::manager(user_id))
    }

    /// Registers an employee profile and returns its caller context.
    pub async fn employee(&self, name: &str) -> eyre::Result<Actor> {
        let user_id = UserId::new();
        self.profiles
            .register_employee(RegisterEmployeeRequest::new(user_id, name))
            .await?;
        Ok(Actor::employee(user_id))
    }

    /// Creates a task for `assignee` and drives it to `status` as the
    /// assignee would.
    pub async fn task(
        &self,
        manager: &Actor,
        assignee: &Actor,
        score_value: u32,
        status: TaskStatus,
    ) -> eyre::Result<Task> {
        let request = NewTaskRequest::new("Integration task")
            .assigned_to(assignee.user_id())
            .with_score_value(score_value);
        let mut task = self.tasks.create_task(manager, request).await?;
        if status != TaskStatus::Pending {
            task = self
                .tasks
                .transition(assignee, task.id(), TaskStatus::InProgress)
                .await?;
        }
        if matches!(status, TaskStatus::Completed | TaskStatus::Failed) {
            task = self.tasks.transition(assignee, task.id(), status).await?;
        }
        Ok(task)
    }
}
