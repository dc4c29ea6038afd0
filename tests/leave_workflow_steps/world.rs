//! Shared world state for leave workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workforce::config::{ScoringPolicy, TransferMode};
use workforce::identity::{
    adapters::memory::InMemoryProfileRepository,
    domain::{Actor, UserId},
};
use workforce::leave::{
    adapters::memory::InMemoryLeaveRepository,
    domain::LeaveRequest,
    services::{LeaveWorkflowError, LeaveWorkflowService},
};
use workforce::locks::EmployeeLocks;
use workforce::scoring::services::ScoringService;
use workforce::task::adapters::memory::InMemoryTaskRepository;

/// Workflow type used by the BDD world.
pub type TestWorkflow = LeaveWorkflowService<
    InMemoryLeaveRepository,
    InMemoryTaskRepository,
    InMemoryProfileRepository,
    DefaultClock,
>;

/// Scenario world for leave workflow behaviour tests.
pub struct LeaveWorkflowWorld {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub workflow: TestWorkflow,
    pub manager: Actor,
    pub employees: HashMap<String, Actor>,
    pub leave: Option<LeaveRequest>,
    pub transferred: Option<usize>,
    pub last_error: Option<LeaveWorkflowError>,
}

impl LeaveWorkflowWorld {
    /// Creates a world with empty stores and default policies.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let clock = Arc::new(DefaultClock);
        let scoring = Arc::new(ScoringService::new(
            Arc::clone(&tasks),
            Arc::clone(&profiles),
            Arc::clone(&clock),
            Arc::new(EmployeeLocks::new()),
            ScoringPolicy::default(),
        ));
        let workflow = LeaveWorkflowService::new(
            Arc::new(InMemoryLeaveRepository::new()),
            Arc::clone(&tasks),
            Arc::clone(&profiles),
            scoring,
            clock,
            TransferMode::default(),
        );

        Self {
            tasks,
            profiles,
            workflow,
            manager: Actor::manager(UserId::new()),
            employees: HashMap::new(),
            leave: None,
            transferred: None,
            last_error: None,
        }
    }

    /// Returns the employee registered under `name`.
    pub fn employee(&self, name: &str) -> Result<Actor, eyre::Report> {
        self.employees
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown employee {name} in scenario world"))
    }

    /// Returns the scenario leave request as last seen.
    pub fn leave(&self) -> Result<&LeaveRequest, eyre::Report> {
        self.leave
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing leave request in scenario world"))
    }
}

impl Default for LeaveWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LeaveWorkflowWorld {
    LeaveWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
