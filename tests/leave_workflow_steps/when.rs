//! When steps for leave workflow BDD scenarios.

use super::world::{LeaveWorkflowWorld, run_async};
use chrono::{Duration, Utc};
use rstest_bdd_macros::when;

#[when(r#""{name}" files a leave request"#)]
fn file_leave(world: &mut LeaveWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let employee = world.employee(&name)?;
    let start = Utc::now() + Duration::days(1);
    match run_async(world.workflow.file_leave_request(
        &employee,
        start,
        start + Duration::days(3),
        "Conference",
    )) {
        Ok(request) => world.leave = Some(request),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#"the manager transfers the open tasks of "{from}" to "{to}""#)]
fn transfer_tasks(
    world: &mut LeaveWorkflowWorld,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    world.employee(&from)?;
    let target = world.employee(&to)?;
    let leave_id = world.leave()?.id();
    match run_async(
        world
            .workflow
            .transfer_tasks(&world.manager, leave_id, target.user_id()),
    ) {
        Ok(moved) => world.transferred = Some(moved),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when("the manager approves the leave request")]
fn approve_leave(world: &mut LeaveWorkflowWorld) -> Result<(), eyre::Report> {
    decide(world, true)
}

#[when("the manager rejects the leave request")]
fn reject_leave(world: &mut LeaveWorkflowWorld) -> Result<(), eyre::Report> {
    decide(world, false)
}

fn decide(world: &mut LeaveWorkflowWorld, approved: bool) -> Result<(), eyre::Report> {
    let leave_id = world.leave()?.id();
    match run_async(world.workflow.decide(&world.manager, leave_id, approved)) {
        Ok(request) => world.leave = Some(request),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}
