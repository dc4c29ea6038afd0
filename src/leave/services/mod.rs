//! Service layer for the leave and transfer workflow.

mod workflow;

pub use workflow::{LeaveWorkflowError, LeaveWorkflowResult, LeaveWorkflowService};
