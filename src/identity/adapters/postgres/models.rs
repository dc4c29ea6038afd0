//! Diesel row models for profile persistence.

use super::schema::{employee_profiles, manager_profiles};
use diesel::prelude::*;

/// Row model for employee profiles, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employee_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeProfileRow {
    /// Profile identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Job position.
    pub position: Option<String>,
    /// Performance score.
    pub score: i64,
    /// Leave score.
    pub leave_score: i32,
    /// Success rate in percent.
    pub success_rate: f64,
    /// Completed task count.
    pub tasks_completed: i32,
    /// Failed task count.
    pub tasks_failed: i32,
}

/// Row model for manager profiles, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = manager_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ManagerProfileRow {
    /// Profile identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Annual salary.
    pub salary: f64,
    /// Number of projects.
    pub projects_count: i32,
    /// Project success rate in percent.
    pub success_rate: f64,
    /// Team headcount.
    pub team_size: i32,
}
