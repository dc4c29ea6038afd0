//! Port definitions for leave persistence.

mod repository;

pub use repository::{LeaveRepository, LeaveRepositoryError, LeaveRepositoryResult};
