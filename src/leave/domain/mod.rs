//! Domain model for leave requests.

mod error;
mod ids;
mod request;
mod status;

pub use error::{LeaveDomainError, ParseLeaveStatusError};
pub use ids::LeaveRequestId;
pub use request::{LeavePeriod, LeaveRequest, PersistedLeaveRequestData};
pub use status::LeaveStatus;
