//! In-memory adapters for task persistence.

mod report;
mod task;

pub use report::InMemoryStatusReportRepository;
pub use task::InMemoryTaskRepository;
