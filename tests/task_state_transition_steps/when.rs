//! When steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use rstest_bdd_macros::when;
use workforce::task::domain::TaskStatus;

#[when(r#""{name}" moves the task to "{status}""#)]
fn move_task(
    world: &mut TaskTransitionWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let actor = world.employee(&name)?;
    let next = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world.task()?.id();

    let result = run_async(world.service.transition(&actor, task_id, next));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}
