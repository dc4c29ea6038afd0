//! Task aggregate root and related task lifecycle types.

use super::{ScoreValue, TaskDomainError, TaskId, TaskPriority, TaskStatus};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a leave transfer treats the status of reassigned tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferMode {
    /// Only the assignee changes; the task keeps its status.
    #[default]
    PreserveStatus,
    /// The assignee changes and the task restarts as `pending` for the new
    /// one. Progress made by the previous assignee is not carried over.
    ResetToPending,
}

impl TransferMode {
    /// Returns the canonical configuration value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreserveStatus => "preserve-status",
            Self::ResetToPending => "reset-to-pending",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preserve-status" => Ok(Self::PreserveStatus),
            "reset-to-pending" => Ok(Self::ResetToPending),
            other => Err(format!(
                "unknown transfer mode '{other}', expected preserve-status or reset-to-pending"
            )),
        }
    }
}

/// Unvalidated input for a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    /// Task title; must not be blank.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Initial assignee, if known.
    pub assigned_to: Option<UserId>,
    /// Advisory priority.
    pub priority: TaskPriority,
    /// Score weight.
    pub score_value: ScoreValue,
    /// Estimated effort in hours.
    pub estimated_hours: Option<f64>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with default priority and score weight.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            assigned_to: None,
            priority: TaskPriority::default(),
            score_value: ScoreValue::default(),
            estimated_hours: None,
            due_date: None,
        }
    }
}

/// Partial update of a task's descriptive fields.
///
/// Status is intentionally absent; it only changes through
/// [`Task::transition_to`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDetailsUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// Measured effort in hours.
    pub actual_hours: Option<f64>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    assigned_to: Option<UserId>,
    created_by: UserId,
    status: TaskStatus,
    priority: TaskPriority,
    score_value: ScoreValue,
    estimated_hours: Option<f64>,
    actual_hours: Option<f64>,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted assignee.
    pub assigned_to: Option<UserId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted score weight.
    pub score_value: ScoreValue,
    /// Persisted estimate.
    pub estimated_hours: Option<f64>,
    /// Persisted measured effort.
    pub actual_hours: Option<f64>,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title and
    /// [`TaskDomainError::InvalidHours`] for a negative or non-finite
    /// estimate.
    pub fn create(
        draft: TaskDraft,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = validated_title(&draft.title)?;
        let estimated_hours = validated_hours(draft.estimated_hours, "estimated_hours")?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title,
            description: draft.description,
            assigned_to: draft.assigned_to,
            created_by,
            status: TaskStatus::Pending,
            priority: draft.priority,
            score_value: draft.score_value,
            estimated_hours,
            actual_hours: None,
            due_date: draft.due_date,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            status: data.status,
            priority: data.priority,
            score_value: data.score_value,
            estimated_hours: data.estimated_hours,
            actual_hours: data.actual_hours,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the creating manager.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the score weight.
    #[must_use]
    pub const fn score_value(&self) -> ScoreValue {
        self.score_value
    }

    /// Returns the estimated effort.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<f64> {
        self.estimated_hours
    }

    /// Returns the measured effort.
    #[must_use]
    pub const fn actual_hours(&self) -> Option<f64> {
        self.actual_hours
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp; set iff the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` when the task is not completed and its due date has
    /// passed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Moves the task along the status state machine.
    ///
    /// Entering `completed` stamps `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when `next` is
    /// not reachable from the current status.
    pub fn transition_to(
        &mut self,
        next: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: next,
            });
        }

        let timestamp = clock.utc();
        self.status = next;
        if next == TaskStatus::Completed {
            self.completed_at = Some(timestamp);
        }
        self.updated_at = timestamp;
        Ok(())
    }

    /// Assigns an open task to `assignee`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotOpen`] when the task is no longer
    /// `pending` or `in_progress`.
    pub fn assign(&mut self, assignee: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_open()?;
        self.assigned_to = Some(assignee);
        self.touch(clock);
        Ok(())
    }

    /// Hands an open task to a new assignee as part of a leave transfer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] (towards
    /// `transferred`) when the task is not open.
    pub fn transfer_to(
        &mut self,
        assignee: UserId,
        mode: TransferMode,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.is_open() {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: TaskStatus::Transferred,
            });
        }

        self.assigned_to = Some(assignee);
        if mode == TransferMode::ResetToPending {
            self.status = TaskStatus::Pending;
        }
        self.touch(clock);
        Ok(())
    }

    /// Applies a partial update of descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::InvalidHours`] when validation fails; the task is
    /// left unchanged.
    pub fn update_details(
        &mut self,
        update: TaskDetailsUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let title = update.title.as_deref().map(validated_title).transpose()?;
        let actual_hours = validated_hours(update.actual_hours, "actual_hours")?;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if actual_hours.is_some() {
            self.actual_hours = actual_hours;
        }
        self.touch(clock);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), TaskDomainError> {
        if self.status.is_open() {
            Ok(())
        } else {
            Err(TaskDomainError::TaskNotOpen {
                task_id: self.id,
                status: self.status,
            })
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn validated_hours(
    hours: Option<f64>,
    field: &'static str,
) -> Result<Option<f64>, TaskDomainError> {
    match hours {
        Some(value) if !value.is_finite() || value.is_sign_negative() => {
            Err(TaskDomainError::InvalidHours(field))
        }
        other => Ok(other),
    }
}
