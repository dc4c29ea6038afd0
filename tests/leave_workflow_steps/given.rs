//! Given steps for leave workflow BDD scenarios.

use super::world::{LeaveWorkflowWorld, run_async};
use chrono::{Duration, Utc};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use workforce::identity::{
    domain::{Actor, EmployeeProfile, UserId},
    ports::ProfileRepository,
};
use workforce::task::{
    domain::{Task, TaskDraft},
    ports::TaskRepository,
};

#[given(r#"an employee named "{name}""#)]
fn employee_named(world: &mut LeaveWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let user_id = UserId::new();
    let profile = EmployeeProfile::new(user_id, name.as_str(), None)?;
    run_async(world.profiles.store_employee(&profile)).wrap_err("store employee profile")?;
    world.employees.insert(name, Actor::employee(user_id));
    Ok(())
}

#[given(r#""{name}" has {count:usize} open tasks"#)]
fn open_tasks(
    world: &mut LeaveWorkflowWorld,
    name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let assignee = world.employee(&name)?;
    for _ in 0..count {
        let draft = TaskDraft {
            assigned_to: Some(assignee.user_id()),
            ..TaskDraft::new("Handover candidate")
        };
        let task = Task::create(draft, world.manager.user_id(), &DefaultClock)?;
        run_async(world.tasks.store(&task)).wrap_err("store open task")?;
    }
    Ok(())
}

#[given(r#""{name}" has filed a leave request"#)]
fn leave_filed(world: &mut LeaveWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let employee = world.employee(&name)?;
    let start = Utc::now() + Duration::days(1);
    let request = run_async(world.workflow.file_leave_request(
        &employee,
        start,
        start + Duration::days(5),
        "Annual leave",
    ))
    .wrap_err("file leave request in scenario setup")?;
    world.leave = Some(request);
    Ok(())
}

#[given("the manager has approved the leave request")]
fn leave_approved(world: &mut LeaveWorkflowWorld) -> Result<(), eyre::Report> {
    let leave_id = world.leave()?.id();
    let decided = run_async(world.workflow.decide(&world.manager, leave_id, true))
        .wrap_err("approve leave in scenario setup")?;
    world.leave = Some(decided);
    Ok(())
}
