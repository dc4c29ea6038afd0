//! Behaviour tests for task state transition validation.

#[path = "task_state_transition_steps/mod.rs"]
mod task_state_transition_steps_defs;

use rstest_bdd_macros::scenario;
use task_state_transition_steps_defs::world::{TaskTransitionWorld, world};

#[scenario(
    path = "tests/features/task_state_transitions.feature",
    name = "Start work on a pending task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn start_work_on_pending_task(world: TaskTransitionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_state_transitions.feature",
    name = "Completing a started task records the completion time"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completing_records_completion_time(world: TaskTransitionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_state_transitions.feature",
    name = "Reject skipping straight to completed"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_pending_to_completed(world: TaskTransitionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_state_transitions.feature",
    name = "Reject leaving a terminal status"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_transition_from_terminal(world: TaskTransitionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_state_transitions.feature",
    name = "Reject transferring through the status update path"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_direct_transfer(world: TaskTransitionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_state_transitions.feature",
    name = "Another employee cannot move the task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_foreign_transition(world: TaskTransitionWorld) {
    let _ = world;
}
