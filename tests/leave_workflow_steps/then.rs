//! Then steps for leave workflow BDD scenarios.

use super::world::{LeaveWorkflowWorld, run_async};
use rstest_bdd_macros::then;
use workforce::error::ErrorKind;
use workforce::identity::ports::ProfileRepository;
use workforce::leave::domain::LeaveStatus;
use workforce::task::{
    domain::TaskStatus,
    ports::{TaskFilter, TaskRepository},
};

#[then("the leave request needs no transfer")]
fn needs_no_transfer(world: &LeaveWorkflowWorld) -> Result<(), eyre::Report> {
    let leave = world.leave()?;
    if !(leave.tasks_transferred() && leave.transfer_successful()) {
        return Err(eyre::eyre!(
            "expected both transfer flags to be set, got {leave:?}"
        ));
    }
    Ok(())
}

#[then("{count:usize} tasks were transferred")]
fn tasks_were_transferred(world: &LeaveWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    match world.transferred {
        Some(moved) if moved == count => Ok(()),
        other => Err(eyre::eyre!("expected {count} transferred tasks, got {other:?}")),
    }
}

#[then(r#""{name}" has {count:u64} open tasks assigned"#)]
fn open_tasks_assigned(
    world: &LeaveWorkflowWorld,
    name: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let employee = world.employee(&name)?;
    let filter = TaskFilter::all()
        .assigned_to(employee.user_id())
        .with_statuses(&TaskStatus::OPEN);
    let open = run_async(world.tasks.count(&filter))?;
    if open != count {
        return Err(eyre::eyre!("expected {count} open tasks for {name}, found {open}"));
    }
    Ok(())
}

#[then(r#"the leave score of "{name}" is {score:u32}"#)]
fn leave_score_is(world: &LeaveWorkflowWorld, name: String, score: u32) -> Result<(), eyre::Report> {
    let employee = world.employee(&name)?;
    let profile = run_async(world.profiles.find_employee_by_user(employee.user_id()))?
        .ok_or_else(|| eyre::eyre!("missing profile for {name}"))?;
    if profile.leave_score() != score {
        return Err(eyre::eyre!(
            "expected leave score {score}, found {}",
            profile.leave_score()
        ));
    }
    Ok(())
}

#[then(r#"the leave request is "{status}""#)]
fn leave_request_is(world: &LeaveWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = LeaveStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let leave_id = world.leave()?.id();
    let stored = run_async(world.workflow.list_leave_requests(&world.manager))?
        .into_iter()
        .find(|request| request.id() == leave_id)
        .ok_or_else(|| eyre::eyre!("leave request {leave_id} not stored"))?;
    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected leave status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the decision is rejected as an invalid transition")]
fn decision_rejected(world: &LeaveWorkflowWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(err) if err.kind() == ErrorKind::InvalidTransition => Ok(()),
        other => Err(eyre::eyre!("expected an invalid transition, got {other:?}")),
    }
}
