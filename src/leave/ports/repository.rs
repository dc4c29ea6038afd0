//! Repository port for leave requests.

use crate::identity::domain::ProfileId;
use crate::leave::domain::{LeaveRequest, LeaveRequestId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for leave repository operations.
pub type LeaveRepositoryResult<T> = Result<T, LeaveRepositoryError>;

/// Leave request persistence contract.
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    /// Stores a new request.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveRepositoryError::DuplicateRequest`] when the ID
    /// already exists.
    async fn store(&self, request: &LeaveRequest) -> LeaveRepositoryResult<()>;

    /// Replaces an existing request.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveRepositoryError::NotFound`] when the request does not
    /// exist.
    async fn update(&self, request: &LeaveRequest) -> LeaveRepositoryResult<()>;

    /// Finds a request by identifier.
    async fn find_by_id(&self, id: LeaveRequestId) -> LeaveRepositoryResult<Option<LeaveRequest>>;

    /// Returns one employee's requests, newest first.
    async fn list_for_employee(
        &self,
        employee: ProfileId,
    ) -> LeaveRepositoryResult<Vec<LeaveRequest>>;

    /// Returns every request, newest first.
    async fn list_all(&self) -> LeaveRepositoryResult<Vec<LeaveRequest>>;
}

/// Errors returned by leave repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LeaveRepositoryError {
    /// A request with the same identifier already exists.
    #[error("duplicate leave request identifier: {0}")]
    DuplicateRequest(LeaveRequestId),

    /// The request was not found.
    #[error("leave request not found: {0}")]
    NotFound(LeaveRequestId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LeaveRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
