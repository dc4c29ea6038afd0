//! Application services for task lifecycle orchestration and reporting.

mod lifecycle;
mod reporting;

pub use lifecycle::{NewTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
pub use reporting::{StatusReportError, StatusReportResult, StatusReportService};
