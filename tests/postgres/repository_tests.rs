//! Repository behaviour against a real `PostgreSQL` server.

use super::helpers::TemporaryDatabase;
use chrono::{Duration, Utc};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use workforce::config::TransferMode;
use workforce::identity::{
    adapters::postgres::PostgresProfileRepository,
    domain::{EmployeeProfile, UserId},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use workforce::leave::{
    adapters::postgres::PostgresLeaveRepository,
    domain::{LeavePeriod, LeaveRequest},
    ports::LeaveRepository,
};
use workforce::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{Task, TaskDraft, TaskStatus},
    ports::{Page, TaskFilter, TaskRepository},
};

fn open_task(assignee: UserId) -> eyre::Result<Task> {
    let draft = TaskDraft {
        assigned_to: Some(assignee),
        ..TaskDraft::new("Persisted task")
    };
    Ok(Task::create(draft, UserId::new(), &DefaultClock)?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_profiles_are_rejected() -> eyre::Result<()> {
    let Some(database) = TemporaryDatabase::create()? else {
        return Ok(());
    };
    let profiles = PostgresProfileRepository::new(database.pool());
    let user_id = UserId::new();
    profiles
        .store_employee(&EmployeeProfile::new(user_id, "Ada", None)?)
        .await?;

    let second = profiles
        .store_employee(&EmployeeProfile::new(user_id, "Ada again", None)?)
        .await;

    ensure!(matches!(second, Err(ProfileRepositoryError::DuplicateUser(id)) if id == user_id));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_filters_and_bulk_updates_round_trip() -> eyre::Result<()> {
    let Some(database) = TemporaryDatabase::create()? else {
        return Ok(());
    };
    let tasks = PostgresTaskRepository::new(database.pool());
    let ada = UserId::new();
    let bo = UserId::new();
    let mut first = open_task(ada)?;
    let mut second = open_task(ada)?;
    second.transition_to(TaskStatus::InProgress, &DefaultClock)?;
    tasks.store(&first).await?;
    tasks.store(&second).await?;

    let open = TaskFilter::all()
        .assigned_to(ada)
        .with_statuses(&TaskStatus::OPEN);
    ensure!(tasks.count(&open).await? == 2);
    ensure!(tasks.find(&open.clone().paged(Page::new(0, 1))).await?.len() == 1);

    first.transfer_to(bo, TransferMode::PreserveStatus, &DefaultClock)?;
    second.transfer_to(bo, TransferMode::PreserveStatus, &DefaultClock)?;
    tasks.update_all(&[first, second.clone()]).await?;

    ensure!(tasks.count(&open).await? == 0);
    let moved = tasks.find(&TaskFilter::all().assigned_to(bo)).await?;
    ensure!(moved.len() == 2);
    let stored = tasks
        .find_by_id(second.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should be stored"))?;
    ensure!(stored.assigned_to() == Some(bo));
    ensure!(stored.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leave_requests_round_trip() -> eyre::Result<()> {
    let Some(database) = TemporaryDatabase::create()? else {
        return Ok(());
    };
    let profiles = PostgresProfileRepository::new(database.pool());
    let leaves = PostgresLeaveRepository::new(database.pool());
    let profile = EmployeeProfile::new(UserId::new(), "Ada", None)?;
    profiles.store_employee(&profile).await?;

    let start = Utc::now();
    let period = LeavePeriod::new(start, start + Duration::days(2))?;
    let mut request = LeaveRequest::file(profile.id(), period, "Holiday", 1, &DefaultClock)?;
    leaves.store(&request).await?;
    request.record_transfer(1)?;
    request.decide(true, UserId::new(), &DefaultClock)?;
    leaves.update(&request).await?;

    let listed = leaves.list_for_employee(profile.id()).await?;
    ensure!(listed.len() == 1);
    let stored = leaves
        .find_by_id(request.id())
        .await?
        .ok_or_else(|| eyre::eyre!("leave request should be stored"))?;
    ensure!(stored.status() == request.status());
    ensure!(stored.transfer_successful());
    ensure!(stored.approved_by() == request.approved_by());
    Ok(())
}
