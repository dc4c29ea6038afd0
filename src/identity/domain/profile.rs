//! Employee and manager profile aggregates.

use super::{IdentityDomainError, ProfileId, UserId};
use serde::{Deserialize, Serialize};

/// Leave score every employee starts with.
pub const DEFAULT_LEAVE_SCORE: u32 = 100;

const DEFAULT_MANAGER_SALARY: f64 = 100_000.0;
const DEFAULT_TEAM_SIZE: u32 = 10;

/// Performance figures produced by the scoring engine.
///
/// This is the only way the score-related fields of an
/// [`EmployeeProfile`] can change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Non-negative performance score.
    pub score: u64,
    /// Completed share of terminal tasks, in percent.
    pub success_rate: f64,
    /// Number of completed tasks.
    pub tasks_completed: u32,
    /// Number of failed tasks.
    pub tasks_failed: u32,
}

/// Per-employee aggregate of derived performance data.
///
/// Apart from identity, name and position every field is derived: score
/// fields are written by [`EmployeeProfile::record_performance`] and the
/// leave score only moves down through
/// [`EmployeeProfile::apply_leave_penalty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    id: ProfileId,
    user_id: UserId,
    name: String,
    position: Option<String>,
    score: u64,
    leave_score: u32,
    success_rate: f64,
    tasks_completed: u32,
    tasks_failed: u32,
}

/// Parameter object for reconstructing a persisted employee profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedEmployeeProfileData {
    /// Persisted profile identifier.
    pub id: ProfileId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Job position, if recorded.
    pub position: Option<String>,
    /// Persisted performance figures.
    pub performance: PerformanceRecord,
    /// Persisted leave score.
    pub leave_score: u32,
}

impl EmployeeProfile {
    /// Creates a fresh profile with zeroed performance and full leave score.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when `name` is blank.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        position: Option<String>,
    ) -> Result<Self, IdentityDomainError> {
        let raw_name: String = name.into();
        Ok(Self {
            id: ProfileId::new(),
            user_id,
            name: validated_name(&raw_name)?,
            position: position
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            score: 0,
            leave_score: DEFAULT_LEAVE_SCORE,
            success_rate: 0.0,
            tasks_completed: 0,
            tasks_failed: 0,
        })
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEmployeeProfileData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            name: data.name,
            position: data.position,
            score: data.performance.score,
            leave_score: data.leave_score,
            success_rate: data.performance.success_rate,
            tasks_completed: data.performance.tasks_completed,
            tasks_failed: data.performance.tasks_failed,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the job position, if any.
    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    /// Returns the performance score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the leave score.
    #[must_use]
    pub const fn leave_score(&self) -> u32 {
        self.leave_score
    }

    /// Returns the success rate in percent.
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Returns the number of completed tasks.
    #[must_use]
    pub const fn tasks_completed(&self) -> u32 {
        self.tasks_completed
    }

    /// Returns the number of failed tasks.
    #[must_use]
    pub const fn tasks_failed(&self) -> u32 {
        self.tasks_failed
    }

    /// Returns the current performance figures.
    #[must_use]
    pub const fn performance(&self) -> PerformanceRecord {
        PerformanceRecord {
            score: self.score,
            success_rate: self.success_rate,
            tasks_completed: self.tasks_completed,
            tasks_failed: self.tasks_failed,
        }
    }

    /// Overwrites the derived performance fields with a fresh computation.
    pub const fn record_performance(&mut self, record: PerformanceRecord) {
        self.score = record.score;
        self.success_rate = record.success_rate;
        self.tasks_completed = record.tasks_completed;
        self.tasks_failed = record.tasks_failed;
    }

    /// Deducts `penalty` from the leave score, stopping at zero.
    ///
    /// Returns the new leave score.
    pub const fn apply_leave_penalty(&mut self, penalty: u32) -> u32 {
        self.leave_score = self.leave_score.saturating_sub(penalty);
        self.leave_score
    }
}

/// Manager profile holding team metadata. Edited directly, never derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerProfile {
    id: ProfileId,
    user_id: UserId,
    name: String,
    salary: f64,
    projects_count: u32,
    success_rate: f64,
    team_size: u32,
}

/// Parameter object for reconstructing a persisted manager profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedManagerProfileData {
    /// Persisted profile identifier.
    pub id: ProfileId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Annual salary.
    pub salary: f64,
    /// Number of projects run.
    pub projects_count: u32,
    /// Project success rate in percent.
    pub success_rate: f64,
    /// Team headcount.
    pub team_size: u32,
}

impl ManagerProfile {
    /// Creates a manager profile with default team metadata.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when `name` is blank.
    pub fn new(user_id: UserId, name: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw_name: String = name.into();
        Ok(Self {
            id: ProfileId::new(),
            user_id,
            name: validated_name(&raw_name)?,
            salary: DEFAULT_MANAGER_SALARY,
            projects_count: 0,
            success_rate: 0.0,
            team_size: DEFAULT_TEAM_SIZE,
        })
    }

    /// Sets the salary.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidSalary`] for negative or
    /// non-finite amounts.
    pub fn with_salary(mut self, salary: f64) -> Result<Self, IdentityDomainError> {
        if !salary.is_finite() || salary.is_sign_negative() {
            return Err(IdentityDomainError::InvalidSalary);
        }
        self.salary = salary;
        Ok(self)
    }

    /// Sets the team size.
    #[must_use]
    pub const fn with_team_size(mut self, team_size: u32) -> Self {
        self.team_size = team_size;
        self
    }

    /// Reconstructs a manager profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedManagerProfileData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            name: data.name,
            salary: data.salary,
            projects_count: data.projects_count,
            success_rate: data.success_rate,
            team_size: data.team_size,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the salary.
    #[must_use]
    pub const fn salary(&self) -> f64 {
        self.salary
    }

    /// Returns the number of projects.
    #[must_use]
    pub const fn projects_count(&self) -> u32 {
        self.projects_count
    }

    /// Returns the project success rate.
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Returns the team headcount.
    #[must_use]
    pub const fn team_size(&self) -> u32 {
        self.team_size
    }
}

fn validated_name(raw: &str) -> Result<String, IdentityDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentityDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
