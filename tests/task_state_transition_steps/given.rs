//! Given steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workforce::identity::domain::{Actor, UserId};
use workforce::task::{domain::TaskStatus, services::NewTaskRequest};

#[given(r#"an employee named "{name}""#)]
fn employee_named(world: &mut TaskTransitionWorld, name: String) {
    world.employees.insert(name, Actor::employee(UserId::new()));
}

#[given(r#"a task assigned to "{name}""#)]
fn task_assigned_to(world: &mut TaskTransitionWorld, name: String) -> Result<(), eyre::Report> {
    let assignee = world.employee(&name)?;
    let request = NewTaskRequest::new("Prepare release notes").assigned_to(assignee.user_id());
    let created = run_async(world.service.create_task(&world.manager, request))
        .wrap_err("create task for transition scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#""{name}" has moved the task to "{status}""#)]
fn task_has_been_moved(
    world: &mut TaskTransitionWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let actor = world.employee(&name)?;
    let next = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world.task()?.id();

    let moved = run_async(world.service.transition(&actor, task_id, next))
        .wrap_err("transition task in scenario setup")?;
    world.task = Some(moved);
    Ok(())
}
