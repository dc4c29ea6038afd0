//! Domain model for task lifecycle management.
//!
//! The task domain models the status state machine, assignment and
//! transfer, and append-only status reports while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod report;
mod task;
mod values;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{ReportId, TaskId};
pub use report::{PersistedReportData, Progress, TaskStatusReport};
pub use task::{PersistedTaskData, Task, TaskDetailsUpdate, TaskDraft, TransferMode};
pub use values::{ScoreValue, TaskPriority, TaskStatus};
