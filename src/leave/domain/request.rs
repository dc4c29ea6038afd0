//! Leave request aggregate.

use super::{LeaveDomainError, LeaveRequestId, LeaveStatus};
use crate::identity::domain::{ProfileId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated leave period; `end` is strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl LeavePeriod {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveDomainError::InvalidPeriod`] unless `end > start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, LeaveDomainError> {
        if end <= start {
            return Err(LeaveDomainError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first instant of leave.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the instant leave ends.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A leave request owned by an employee profile.
///
/// Transfer flags start `true` when the employee had no open work at filing
/// time; otherwise they are set by [`LeaveRequest::record_transfer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    id: LeaveRequestId,
    employee_profile_id: ProfileId,
    period: LeavePeriod,
    reason: String,
    status: LeaveStatus,
    approved_by: Option<UserId>,
    approval_date: Option<DateTime<Utc>>,
    tasks_transferred: bool,
    transfer_successful: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLeaveRequestData {
    /// Persisted identifier.
    pub id: LeaveRequestId,
    /// Owning employee profile.
    pub employee_profile_id: ProfileId,
    /// Leave period.
    pub period: LeavePeriod,
    /// Stated reason.
    pub reason: String,
    /// Decision status.
    pub status: LeaveStatus,
    /// Deciding manager.
    pub approved_by: Option<UserId>,
    /// Decision timestamp.
    pub approval_date: Option<DateTime<Utc>>,
    /// Whether the transfer step has run or was unnecessary.
    pub tasks_transferred: bool,
    /// Whether work was actually handed over.
    pub transfer_successful: bool,
    /// Filing timestamp.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Files a pending request.
    ///
    /// With no `open_tasks` the request is immediately marked as needing no
    /// transfer.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveDomainError::EmptyReason`] for a blank reason.
    pub fn file(
        employee_profile_id: ProfileId,
        period: LeavePeriod,
        reason: &str,
        open_tasks: u64,
        clock: &impl Clock,
    ) -> Result<Self, LeaveDomainError> {
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(LeaveDomainError::EmptyReason);
        }
        let nothing_to_transfer = open_tasks == 0;
        Ok(Self {
            id: LeaveRequestId::new(),
            employee_profile_id,
            period,
            reason: trimmed.to_owned(),
            status: LeaveStatus::Pending,
            approved_by: None,
            approval_date: None,
            tasks_transferred: nothing_to_transfer,
            transfer_successful: nothing_to_transfer,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLeaveRequestData) -> Self {
        Self {
            id: data.id,
            employee_profile_id: data.employee_profile_id,
            period: data.period,
            reason: data.reason,
            status: data.status,
            approved_by: data.approved_by,
            approval_date: data.approval_date,
            tasks_transferred: data.tasks_transferred,
            transfer_successful: data.transfer_successful,
            created_at: data.created_at,
        }
    }

    /// Fails unless the request is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveDomainError::AlreadyDecided`].
    pub const fn ensure_pending(&self) -> Result<(), LeaveDomainError> {
        if self.status.is_decided() {
            return Err(LeaveDomainError::AlreadyDecided {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Records the outcome of a transfer of `moved` tasks.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveDomainError::AlreadyDecided`] once decided.
    pub fn record_transfer(&mut self, moved: usize) -> Result<(), LeaveDomainError> {
        self.ensure_pending()?;
        self.tasks_transferred = true;
        self.transfer_successful = moved > 0;
        Ok(())
    }

    /// Approves or rejects the request.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveDomainError::AlreadyDecided`] once decided.
    pub fn decide(
        &mut self,
        approved: bool,
        approver: UserId,
        clock: &impl Clock,
    ) -> Result<(), LeaveDomainError> {
        self.ensure_pending()?;
        self.status = if approved {
            LeaveStatus::Approved
        } else {
            LeaveStatus::Rejected
        };
        self.approved_by = Some(approver);
        self.approval_date = Some(clock.utc());
        Ok(())
    }

    /// Returns `true` when leave was approved without its work having been
    /// handed over.
    #[must_use]
    pub const fn requires_leave_penalty(&self) -> bool {
        matches!(self.status, LeaveStatus::Approved) && !self.transfer_successful
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> LeaveRequestId {
        self.id
    }

    /// Returns the owning employee profile.
    #[must_use]
    pub const fn employee_profile_id(&self) -> ProfileId {
        self.employee_profile_id
    }

    /// Returns the leave period.
    #[must_use]
    pub const fn period(&self) -> LeavePeriod {
        self.period
    }

    /// Returns the stated reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the decision status.
    #[must_use]
    pub const fn status(&self) -> LeaveStatus {
        self.status
    }

    /// Returns the deciding manager.
    #[must_use]
    pub const fn approved_by(&self) -> Option<UserId> {
        self.approved_by
    }

    /// Returns the decision timestamp.
    #[must_use]
    pub const fn approval_date(&self) -> Option<DateTime<Utc>> {
        self.approval_date
    }

    /// Returns whether the transfer step has run or was unnecessary.
    #[must_use]
    pub const fn tasks_transferred(&self) -> bool {
        self.tasks_transferred
    }

    /// Returns whether work was handed over.
    #[must_use]
    pub const fn transfer_successful(&self) -> bool {
        self.transfer_successful
    }

    /// Returns the filing timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
