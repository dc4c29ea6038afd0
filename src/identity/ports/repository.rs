//! Repository port for employee and manager profiles.

use crate::identity::domain::{EmployeeProfile, ManagerProfile, ProfileId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a new employee profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateUser`] when the user
    /// already owns an employee or manager profile.
    async fn store_employee(&self, profile: &EmployeeProfile) -> ProfileRepositoryResult<()>;

    /// Persists changes to an existing employee profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does
    /// not exist.
    async fn update_employee(&self, profile: &EmployeeProfile) -> ProfileRepositoryResult<()>;

    /// Finds the employee profile owned by `user_id`.
    async fn find_employee_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<EmployeeProfile>>;

    /// Finds an employee profile by profile identifier.
    async fn find_employee_by_id(
        &self,
        id: ProfileId,
    ) -> ProfileRepositoryResult<Option<EmployeeProfile>>;

    /// Returns every employee profile.
    async fn list_employees(&self) -> ProfileRepositoryResult<Vec<EmployeeProfile>>;

    /// Stores a new manager profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateUser`] when the user
    /// already owns an employee or manager profile.
    async fn store_manager(&self, profile: &ManagerProfile) -> ProfileRepositoryResult<()>;

    /// Finds the manager profile owned by `user_id`.
    async fn find_manager_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<ManagerProfile>>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// The user already owns a profile.
    #[error("user already has a profile: {0}")]
    DuplicateUser(UserId),

    /// The profile was not found.
    #[error("profile not found: {0}")]
    NotFound(ProfileId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
