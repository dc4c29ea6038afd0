//! Task outcomes flowing into scores, rankings and aggregates.

use super::helpers::{App, app};
use eyre::ensure;
use rstest::rstest;
use workforce::scoring::domain::CallerStats;
use workforce::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outcomes_rank_employees_on_the_leaderboard(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let bo = app.employee("Bo").await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Completed).await?;
    app.task(&manager, &ada, 500, TaskStatus::Completed).await?;
    app.task(&manager, &bo, 1_000, TaskStatus::Completed).await?;
    app.task(&manager, &bo, 200, TaskStatus::Failed).await?;

    let scores = app.scoring.recalculate_all(&manager).await?;
    let board = app.scoring.leaderboard(&manager, 10).await?;

    ensure!(scores.len() == 2);
    ensure!(board.len() == 2);
    let leader = board.first().ok_or_else(|| eyre::eyre!("empty leaderboard"))?;
    let runner_up = board.get(1).ok_or_else(|| eyre::eyre!("missing runner-up"))?;
    ensure!(leader.user_id == ada.user_id() && leader.score == 1_500 && leader.rank == 1);
    ensure!(runner_up.user_id == bo.user_id() && runner_up.score == 600 && runner_up.rank == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_and_team_stats_reflect_the_store(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    let bo = app.employee("Bo").await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Completed).await?;
    app.task(&manager, &ada, 1_000, TaskStatus::InProgress).await?;
    app.task(&manager, &bo, 1_000, TaskStatus::Pending).await?;
    app.scoring.recalculate_all(&manager).await?;

    let overview = app.scoring.dashboard(&manager).await?;
    let own = app.scoring.dashboard(&ada).await?;

    ensure!(overview.tasks.total == 3);
    ensure!(overview.tasks.completed == 1);
    ensure!(overview.tasks.in_progress == 1);
    ensure!(overview.tasks.pending == 1);
    let team = overview.team.ok_or_else(|| eyre::eyre!("managers get team stats"))?;
    ensure!(team.total_employees == 2);
    ensure!(team.average_score == 500.0);
    ensure!(team.total_tasks_open == 2);
    ensure!(own.tasks.total == 2);
    ensure!(own.team.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employee_stats_recompute_before_reporting(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Completed).await?;

    let stats = app.scoring.employee_stats(&ada).await?;
    let manager_stats = app.scoring.employee_stats(&manager).await?;

    let CallerStats::Employee(profile) = stats else {
        eyre::bail!("employees get their employee profile");
    };
    ensure!(profile.score() == 1_000);
    ensure!(profile.success_rate() == 100.0);
    ensure!(matches!(manager_stats, CallerStats::Manager(_)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn performance_summary_covers_recent_tasks(app: App) -> eyre::Result<()> {
    let manager = app.manager("Morgan").await?;
    let ada = app.employee("Ada").await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Completed).await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Pending).await?;
    app.task(&manager, &ada, 1_000, TaskStatus::Pending).await?;

    let summary = app
        .scoring
        .user_performance(&manager, Some(ada.user_id()))
        .await?;

    ensure!(summary.name == "Ada");
    ensure!(summary.total_tasks == 3);
    ensure!(summary.completed_tasks == 1);
    ensure!(summary.completion_rate == 33.33);
    Ok(())
}
