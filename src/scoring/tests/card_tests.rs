//! Unit tests for score tallying and projections.

use crate::identity::domain::{
    EmployeeProfile, PerformanceRecord, PersistedEmployeeProfileData, ProfileId, UserId,
};
use crate::scoring::domain::{LeaderboardEntry, ScoreCard, TeamStats, round2};
use crate::task::domain::{ScoreValue, Task, TaskDraft, TaskStatus};
use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;

fn task(status: TaskStatus, weight: u32) -> Task {
    let clock = DefaultClock;
    let draft = TaskDraft {
        score_value: ScoreValue::new(weight).expect("positive weight"),
        ..TaskDraft::new("Scored work")
    };
    let mut task = Task::create(draft, UserId::new(), &clock).expect("valid task");
    if status != TaskStatus::Pending {
        task.transition_to(TaskStatus::InProgress, &clock)
            .expect("pending -> in_progress");
    }
    if matches!(status, TaskStatus::Completed | TaskStatus::Failed) {
        task.transition_to(status, &clock).expect("terminal transition");
    }
    task
}

fn profile(user: u128, score: u64, success_rate: f64) -> EmployeeProfile {
    EmployeeProfile::from_persisted(PersistedEmployeeProfileData {
        id: ProfileId::new(),
        user_id: UserId::from_uuid(Uuid::from_u128(user)),
        name: format!("Employee {user}"),
        position: None,
        performance: PerformanceRecord {
            score,
            success_rate,
            tasks_completed: 0,
            tasks_failed: 0,
        },
        leave_score: 100,
    })
}

#[rstest]
fn one_completed_one_failed_nets_zero() {
    let tasks = [
        task(TaskStatus::Completed, 1_000),
        task(TaskStatus::Failed, 500),
    ];

    let card = ScoreCard::tally(&tasks);

    assert_eq!(card.score(2), 0);
    assert_eq!(card.success_rate(), 50.0);
}

#[rstest]
fn negative_totals_clamp_to_zero() {
    let tasks = [
        task(TaskStatus::Failed, 1_000),
        task(TaskStatus::Failed, 1_000),
    ];

    let card = ScoreCard::tally(&tasks);

    assert_eq!(card.score(2), 0);
    assert_eq!(card.success_rate(), 0.0);
    assert_eq!(card.failed(), 2);
}

#[rstest]
fn open_and_transferred_tasks_do_not_count() {
    let tasks = [
        task(TaskStatus::Pending, 1_000),
        task(TaskStatus::InProgress, 1_000),
        task(TaskStatus::Completed, 300),
    ];

    let card = ScoreCard::tally(&tasks);

    assert_eq!(card.completed(), 1);
    assert_eq!(card.failed(), 0);
    assert_eq!(card.score(2), 300);
    assert_eq!(card.success_rate(), 100.0);
}

#[rstest]
#[case(1, 1_500)]
#[case(2, 1_000)]
#[case(4, 0)]
fn failure_weight_scales_penalty(#[case] weight: u32, #[case] expected: u64) {
    let tasks = [
        task(TaskStatus::Completed, 1_000),
        task(TaskStatus::Completed, 1_000),
        task(TaskStatus::Failed, 500),
    ];

    assert_eq!(ScoreCard::tally(&tasks).score(weight), expected);
}

#[rstest]
fn empty_tally_has_zero_rate() {
    let tasks: [Task; 0] = [];
    let card = ScoreCard::tally(&tasks);

    assert_eq!(
        card.performance(2),
        PerformanceRecord {
            score: 0,
            success_rate: 0.0,
            tasks_completed: 0,
            tasks_failed: 0,
        }
    );
}

#[rstest]
fn leaderboard_orders_by_score_then_user_id() {
    let profiles = vec![
        profile(3, 500, 50.0),
        profile(2, 900, 90.0),
        profile(1, 500, 75.0),
        profile(4, 100, 10.0),
    ];

    let entries = LeaderboardEntry::rank_profiles(profiles, 3);

    let order: Vec<(usize, u64, String)> = entries
        .iter()
        .map(|entry| (entry.rank, entry.score, entry.name.clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            (1, 900, "Employee 2".to_owned()),
            (2, 500, "Employee 1".to_owned()),
            (3, 500, "Employee 3".to_owned()),
        ]
    );
}

#[rstest]
fn leaderboard_limit_zero_is_empty() {
    assert!(LeaderboardEntry::rank_profiles(vec![profile(1, 10, 0.0)], 0).is_empty());
}

#[rstest]
fn team_stats_round_averages() {
    let profiles = [profile(1, 1_000, 100.0), profile(2, 0, 33.333), profile(3, 1, 0.0)];

    let stats = TeamStats::from_profiles(&profiles, 4, 2);

    assert_eq!(stats.total_employees, 3);
    assert_eq!(stats.average_score, 333.67);
    assert_eq!(stats.average_success_rate, 44.44);
    assert_eq!(stats.total_tasks_completed, 4);
    assert_eq!(stats.total_tasks_open, 2);
}

#[rstest]
fn team_stats_without_employees_is_all_zero() {
    assert_eq!(TeamStats::from_profiles(&[], 7, 3), TeamStats::default());
}

#[rstest]
#[case(1.004, 1.0)]
#[case(2.346, 2.35)]
#[case(66.666_666, 66.67)]
fn round2_keeps_two_decimals(#[case] input: f64, #[case] expected: f64) {
    assert_eq!(round2(input), expected);
}
