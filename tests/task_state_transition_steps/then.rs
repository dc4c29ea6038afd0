//! Then steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use rstest_bdd_macros::then;
use workforce::error::ErrorKind;
use workforce::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task()?.id();
    let stored = run_async(world.service.get_task(&world.manager, task_id))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the task has a completion time")]
fn task_has_completion_time(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    if world.task()?.completed_at().is_none() {
        return Err(eyre::eyre!("completed task should carry completed_at"));
    }
    Ok(())
}

#[then("the transition is rejected as invalid")]
fn transition_rejected_as_invalid(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStateTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStateTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the transition is forbidden")]
fn transition_forbidden(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    match result {
        Err(err) if err.kind() == ErrorKind::Forbidden => Ok(()),
        other => Err(eyre::eyre!("expected a forbidden error, got {other:?}")),
    }
}
