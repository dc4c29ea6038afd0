//! Status reports filed without a feedback collaborator.

use super::helpers::{App, app};
use eyre::ensure;
use rstest::rstest;
use workforce::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reports_are_stored_when_feedback_is_disabled(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let task = app.task(&manager, &ada, 1_000, TaskStatus::InProgress).await?;

    let report = app
        .reports
        .file_report(&ada, task.id(), "Drafted the migration plan", 40)
        .await?;
    let listed = app.reports.list_reports(&manager, task.id()).await?;
    let unchanged = app.tasks.get_task(&ada, task.id()).await?;

    ensure!(report.feedback().is_none());
    ensure!(report.feedback_error() == Some("feedback generation is disabled"));
    ensure!(listed.len() == 1);
    ensure!(unchanged.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn colleagues_cannot_report_on_foreign_tasks(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let bo = app.employee("Bo").await?;
    let task = app.task(&manager, &ada, 1_000, TaskStatus::Pending).await?;

    let filed = app.reports.file_report(&bo, task.id(), "Not mine", 10).await;
    let listed = app.reports.list_reports(&bo, task.id()).await;

    ensure!(filed.is_err());
    ensure!(listed.is_err());
    Ok(())
}
