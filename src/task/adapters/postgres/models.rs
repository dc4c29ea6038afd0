//! Diesel row models for task persistence.

use super::schema::{task_status_reports, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for tasks, used for reads, inserts and full-row updates.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Long description.
    pub description: Option<String>,
    /// Current assignee.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creating manager.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Advisory priority.
    pub priority: String,
    /// Score weight.
    pub score_value: i32,
    /// Estimated effort.
    pub estimated_hours: Option<f64>,
    /// Measured effort.
    pub actual_hours: Option<f64>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Row model for status reports.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_status_reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusReportRow {
    /// Report identifier.
    pub id: uuid::Uuid,
    /// Reported task.
    pub task_id: uuid::Uuid,
    /// Reporting user.
    pub employee_id: uuid::Uuid,
    /// Report body.
    pub report_text: String,
    /// Progress percentage.
    pub progress: i16,
    /// Generated feedback.
    pub feedback: Option<String>,
    /// Feedback failure reason.
    pub feedback_error: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
