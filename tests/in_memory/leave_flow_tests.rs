//! Leave filing, transfer and decisions across services.

use super::helpers::{App, app};
use eyre::ensure;
use rstest::rstest;
use workforce::error::ErrorKind;
use workforce::identity::domain::UserId;
use workforce::leave::domain::LeaveStatus;
use workforce::task::{domain::TaskStatus, ports::Page};
use chrono::{Duration, Utc};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transferred_work_keeps_scoring_with_the_new_assignee(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let bo = app.employee("Bo").await?;
    let open = app.task(&manager, &ada, 800, TaskStatus::InProgress).await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Completed).await?;

    let start = Utc::now() + Duration::days(2);
    let request = app
        .leave
        .file_leave_request(&ada, start, start + Duration::days(7), "Parental leave")
        .await?;
    let moved = app
        .leave
        .transfer_tasks(&manager, request.id(), bo.user_id())
        .await?;
    let decided = app.leave.decide(&manager, request.id(), true).await?;

    ensure!(moved == 1);
    ensure!(decided.status() == LeaveStatus::Approved);

    app.tasks
        .transition(&bo, open.id(), TaskStatus::Completed)
        .await?;
    ensure!(app.scoring.calculate_employee_score(bo.user_id()).await? == 800);
    ensure!(app.scoring.calculate_employee_score(ada.user_id()).await? == 1_000);

    let bo_tasks = app.tasks.list_tasks(&bo, Page::default()).await?;
    ensure!(bo_tasks.len() == 1);
    let Some(ada_profile) = app.profiles.find_employee(ada.user_id()).await? else {
        eyre::bail!("profile should exist");
    };
    ensure!(ada_profile.leave_score() == 100);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn former_assignee_loses_access_after_transfer(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let bo = app.employee("Bo").await?;
    let task = app.task(&manager, &ada, 1_000, TaskStatus::Pending).await?;
    let start = Utc::now();
    let request = app
        .leave
        .file_leave_request(&ada, start, start + Duration::days(1), "Medical")
        .await?;
    app.leave
        .transfer_tasks(&manager, request.id(), bo.user_id())
        .await?;

    let former = app.tasks.get_task(&ada, task.id()).await;
    let current = app.tasks.get_task(&bo, task.id()).await?;

    ensure!(former.is_err());
    ensure!(current.assigned_to() == Some(bo.user_id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_untransferred_approvals_floor_leave_score(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Pending).await?;

    for _ in 0..11 {
        let start = Utc::now();
        let request = app
            .leave
            .file_leave_request(&ada, start, start + Duration::days(1), "Errand")
            .await?;
        app.leave.decide(&manager, request.id(), true).await?;
    }

    let Some(profile) = app.profiles.find_employee(ada.user_id()).await? else {
        eyre::bail!("profile should exist");
    };
    ensure!(profile.leave_score() == 0);
    ensure!(app.leave.list_leave_requests(&ada).await?.len() == 11);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transfer_to_unregistered_user_moves_nothing(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let task = app.task(&manager, &ada, 1_000, TaskStatus::Pending).await?;
    let start = Utc::now();
    let request = app
        .leave
        .file_leave_request(&ada, start, start + Duration::days(1), "Errand")
        .await?;

    let result = app
        .leave
        .transfer_tasks(&manager, request.id(), UserId::new())
        .await;

    ensure!(result.is_err());
    let unchanged = app.tasks.get_task(&manager, task.id()).await?;
    ensure!(unchanged.assigned_to() == Some(ada.user_id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_racing_a_transfer_is_never_reverted(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let bo = app.employee("Bo").await?;
    let task = app.task(&manager, &ada, 1_000, TaskStatus::InProgress).await?;
    let start = Utc::now() + Duration::days(1);
    let request = app
        .leave
        .file_leave_request(&ada, start, start + Duration::days(3), "Conference")
        .await?;

    let guard = app.scoring.locks().acquire(ada.user_id()).await;
    let (transfer, completion, ()) = tokio::join!(
        app.leave.transfer_tasks(&manager, request.id(), bo.user_id()),
        app.tasks.transition(&ada, task.id(), TaskStatus::Completed),
        async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            drop(guard);
        },
    );

    let moved = transfer?;
    let stored = app.tasks.get_task(&manager, task.id()).await?;
    match completion {
        Ok(_) => {
            ensure!(moved == 0);
            ensure!(stored.status() == TaskStatus::Completed);
            ensure!(stored.assigned_to() == Some(ada.user_id()));
        }
        Err(err) => {
            ensure!(err.kind() == ErrorKind::Forbidden);
            ensure!(moved == 1);
            ensure!(stored.status() == TaskStatus::InProgress);
            ensure!(stored.assigned_to() == Some(bo.user_id()));
        }
    }
    Ok(())
}
