//! Domain model for users, roles and profiles.

mod error;
mod ids;
mod profile;
mod role;

pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::{ProfileId, UserId};
pub use profile::{
    DEFAULT_LEAVE_SCORE, EmployeeProfile, ManagerProfile, PerformanceRecord,
    PersistedEmployeeProfileData, PersistedManagerProfileData,
};
pub use role::{Actor, Role};
