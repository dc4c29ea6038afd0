//! In-memory repository for employee and manager profiles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::{
    domain::{EmployeeProfile, ManagerProfile, ProfileId, UserId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<InMemoryProfileState>>,
}

#[derive(Debug, Default)]
struct InMemoryProfileState {
    employees: HashMap<ProfileId, EmployeeProfile>,
    employee_by_user: HashMap<UserId, ProfileId>,
    managers: HashMap<UserId, ManagerProfile>,
}

impl InMemoryProfileState {
    fn owns_profile(&self, user_id: UserId) -> bool {
        self.employee_by_user.contains_key(&user_id) || self.managers.contains_key(&user_id)
    }
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ProfileRepositoryResult<RwLockReadGuard<'_, InMemoryProfileState>> {
        self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ProfileRepositoryResult<RwLockWriteGuard<'_, InMemoryProfileState>> {
        self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store_employee(&self, profile: &EmployeeProfile) -> ProfileRepositoryResult<()> {
        let mut state = self.write()?;
        if state.owns_profile(profile.user_id()) {
            return Err(ProfileRepositoryError::DuplicateUser(profile.user_id()));
        }
        state.employee_by_user.insert(profile.user_id(), profile.id());
        state.employees.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update_employee(&self, profile: &EmployeeProfile) -> ProfileRepositoryResult<()> {
        let mut state = self.write()?;
        let existing = state
            .employees
            .get_mut(&profile.id())
            .ok_or(ProfileRepositoryError::NotFound(profile.id()))?;
        *existing = profile.clone();
        Ok(())
    }

    async fn find_employee_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<EmployeeProfile>> {
        let state = self.read()?;
        Ok(state
            .employee_by_user
            .get(&user_id)
            .and_then(|id| state.employees.get(id))
            .cloned())
    }

    async fn find_employee_by_id(
        &self,
        id: ProfileId,
    ) -> ProfileRepositoryResult<Option<EmployeeProfile>> {
        let state = self.read()?;
        Ok(state.employees.get(&id).cloned())
    }

    async fn list_employees(&self) -> ProfileRepositoryResult<Vec<EmployeeProfile>> {
        let state = self.read()?;
        let mut employees: Vec<EmployeeProfile> = state.employees.values().cloned().collect();
        employees.sort_by_key(EmployeeProfile::user_id);
        Ok(employees)
    }

    async fn store_manager(&self, profile: &ManagerProfile) -> ProfileRepositoryResult<()> {
        let mut state = self.write()?;
        if state.owns_profile(profile.user_id()) {
            return Err(ProfileRepositoryError::DuplicateUser(profile.user_id()));
        }
        state.managers.insert(profile.user_id(), profile.clone());
        Ok(())
    }

    async fn find_manager_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<ManagerProfile>> {
        let state = self.read()?;
        Ok(state.managers.get(&user_id).cloned())
    }
}
