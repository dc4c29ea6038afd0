//! In-memory leave request repository.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::domain::ProfileId;
use crate::leave::{
    domain::{LeaveRequest, LeaveRequestId},
    ports::{LeaveRepository, LeaveRepositoryError, LeaveRepositoryResult},
};

/// Thread-safe in-memory leave repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaveRepository {
    requests: Arc<RwLock<HashMap<LeaveRequestId, LeaveRequest>>>,
}

impl InMemoryLeaveRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> LeaveRepositoryResult<RwLockReadGuard<'_, HashMap<LeaveRequestId, LeaveRequest>>> {
        self.requests.read().map_err(|err| {
            LeaveRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> LeaveRepositoryResult<RwLockWriteGuard<'_, HashMap<LeaveRequestId, LeaveRequest>>> {
        self.requests.write().map_err(|err| {
            LeaveRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn newest_first<'a>(requests: impl Iterator<Item = &'a LeaveRequest>) -> Vec<LeaveRequest> {
        let mut listed: Vec<LeaveRequest> = requests.cloned().collect();
        listed.sort_by_key(|request| Reverse(request.created_at()));
        listed
    }
}

#[async_trait]
impl LeaveRepository for InMemoryLeaveRepository {
    async fn store(&self, request: &LeaveRequest) -> LeaveRepositoryResult<()> {
        let mut requests = self.write()?;
        if requests.contains_key(&request.id()) {
            return Err(LeaveRepositoryError::DuplicateRequest(request.id()));
        }
        requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn update(&self, request: &LeaveRequest) -> LeaveRepositoryResult<()> {
        let mut requests = self.write()?;
        let existing = requests
            .get_mut(&request.id())
            .ok_or(LeaveRepositoryError::NotFound(request.id()))?;
        *existing = request.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: LeaveRequestId) -> LeaveRepositoryResult<Option<LeaveRequest>> {
        let requests = self.read()?;
        Ok(requests.get(&id).cloned())
    }

    async fn list_for_employee(
        &self,
        employee: ProfileId,
    ) -> LeaveRepositoryResult<Vec<LeaveRequest>> {
        let requests = self.read()?;
        Ok(Self::newest_first(
            requests
                .values()
                .filter(|request| request.employee_profile_id() == employee),
        ))
    }

    async fn list_all(&self) -> LeaveRepositoryResult<Vec<LeaveRequest>> {
        let requests = self.read()?;
        Ok(Self::newest_first(requests.values()))
    }
}
