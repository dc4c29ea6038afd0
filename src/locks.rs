//! Per-employee advisory locks.
//!
//! Score recomputation, leave-score penalties and task transfers all
//! read-modify-write the same employee profile and task rows. Holding the
//! lock for every employee involved serializes those operations in-process
//! while unrelated employees proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::identity::domain::UserId;

/// Map size above which dead entries are purged on acquisition.
const CLEANUP_THRESHOLD: usize = 128;

/// Registry of per-employee async mutexes.
///
/// Entries are held as `Weak` references so the map only retains locks
/// that are currently held or awaited.
#[derive(Debug, Default)]
pub struct EmployeeLocks {
    locks: Mutex<HashMap<UserId, Weak<AsyncMutex<()>>>>,
}

impl EmployeeLocks {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for a single employee.
    pub async fn acquire(&self, employee: UserId) -> EmployeeGuard {
        self.acquire_many([employee]).await
    }

    /// Acquires the locks for several employees.
    ///
    /// Locks are taken in ascending identifier order with duplicates
    /// removed, so two callers locking overlapping sets cannot deadlock.
    pub async fn acquire_many(&self, employees: impl IntoIterator<Item = UserId>) -> EmployeeGuard {
        let mut ordered: Vec<UserId> = employees.into_iter().collect();
        ordered.sort_unstable();
        ordered.dedup();

        let mut guards = Vec::with_capacity(ordered.len());
        for employee in ordered {
            let mutex = self.entry(employee);
            guards.push(mutex.lock_owned().await);
        }
        EmployeeGuard { _guards: guards }
    }

    fn entry(&self, employee: UserId) -> Arc<AsyncMutex<()>> {
        let mut map = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if map.len() > CLEANUP_THRESHOLD {
            map.retain(|_, weak| weak.strong_count() > 0);
        }
        if let Some(existing) = map.get(&employee).and_then(Weak::upgrade) {
            return existing;
        }
        let created = Arc::new(AsyncMutex::new(()));
        map.insert(employee, Arc::downgrade(&created));
        created
    }
}

/// RAII guard holding one or more employee locks until dropped.
#[derive(Debug)]
pub struct EmployeeGuard {
    _guards: Vec<OwnedMutexGuard<()>>,
}
