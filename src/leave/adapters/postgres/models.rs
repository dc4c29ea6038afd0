//! Diesel row model for leave requests.

use super::schema::leave_requests;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for leave requests, used for reads, inserts and updates.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = leave_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct LeaveRequestRow {
    /// Request identifier.
    pub id: uuid::Uuid,
    /// Owning employee profile.
    pub employee_profile_id: uuid::Uuid,
    /// First instant of leave.
    pub start_date: DateTime<Utc>,
    /// Instant leave ends.
    pub end_date: DateTime<Utc>,
    /// Stated reason.
    pub reason: String,
    /// Decision status.
    pub status: String,
    /// Deciding manager.
    pub approved_by: Option<uuid::Uuid>,
    /// Decision timestamp.
    pub approval_date: Option<DateTime<Utc>>,
    /// Whether the transfer step ran or was unnecessary.
    pub tasks_transferred: bool,
    /// Whether work was handed over.
    pub transfer_successful: bool,
    /// Filing timestamp.
    pub created_at: DateTime<Utc>,
}
