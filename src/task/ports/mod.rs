//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod feedback;
pub mod report;
pub mod repository;

pub use feedback::{FeedbackError, FeedbackGenerator, FeedbackRequest};
pub use report::{
    StatusReportRepository, StatusReportRepositoryError, StatusReportRepositoryResult,
};
pub use repository::{Page, TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
