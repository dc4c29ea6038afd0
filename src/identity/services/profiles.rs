//! Service layer for profile registration.

use crate::error::ErrorKind;
use crate::identity::{
    domain::{EmployeeProfile, IdentityDomainError, ManagerProfile, UserId},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering an employee profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterEmployeeRequest {
    user_id: UserId,
    name: String,
    position: Option<String>,
}

impl RegisterEmployeeRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            position: None,
        }
    }

    /// Sets the job position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// Request payload for registering a manager profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterManagerRequest {
    user_id: UserId,
    name: String,
    salary: Option<f64>,
    team_size: Option<u32>,
}

impl RegisterManagerRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            salary: None,
            team_size: None,
        }
    }

    /// Sets the salary.
    #[must_use]
    pub const fn with_salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }

    /// Sets the team size.
    #[must_use]
    pub const fn with_team_size(mut self, team_size: u32) -> Self {
        self.team_size = Some(team_size);
        self
    }
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

impl ProfileServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Repository(ProfileRepositoryError::DuplicateUser(_)) => {
                ErrorKind::Validation
            }
            Self::Repository(ProfileRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(ProfileRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile registration and lookup service.
#[derive(Clone)]
pub struct ProfileService<P>
where
    P: ProfileRepository,
{
    repository: Arc<P>,
}

impl<P> ProfileService<P>
where
    P: ProfileRepository,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Registers the employee profile for a newly created employee user.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError`] when the name is blank or the user
    /// already owns a profile.
    pub async fn register_employee(
        &self,
        request: RegisterEmployeeRequest,
    ) -> ProfileServiceResult<EmployeeProfile> {
        let RegisterEmployeeRequest {
            user_id,
            name,
            position,
        } = request;
        let profile = EmployeeProfile::new(user_id, name, position)?;
        self.repository.store_employee(&profile).await?;
        info!(employee = %user_id, profile_id = %profile.id(), "registered employee profile");
        Ok(profile)
    }

    /// Registers the manager profile for a newly created manager user.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError`] when validation fails or the user
    /// already owns a profile.
    pub async fn register_manager(
        &self,
        request: RegisterManagerRequest,
    ) -> ProfileServiceResult<ManagerProfile> {
        let RegisterManagerRequest {
            user_id,
            name,
            salary,
            team_size,
        } = request;
        let mut profile = ManagerProfile::new(user_id, name)?;
        if let Some(amount) = salary {
            profile = profile.with_salary(amount)?;
        }
        if let Some(size) = team_size {
            profile = profile.with_team_size(size);
        }
        self.repository.store_manager(&profile).await?;
        info!(manager = %user_id, profile_id = %profile.id(), "registered manager profile");
        Ok(profile)
    }

    /// Finds the employee profile owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when lookup fails.
    pub async fn find_employee(
        &self,
        user_id: UserId,
    ) -> ProfileServiceResult<Option<EmployeeProfile>> {
        Ok(self.repository.find_employee_by_user(user_id).await?)
    }

    /// Finds the manager profile owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when lookup fails.
    pub async fn find_manager(
        &self,
        user_id: UserId,
    ) -> ProfileServiceResult<Option<ManagerProfile>> {
        Ok(self.repository.find_manager_by_user(user_id).await?)
    }
}
