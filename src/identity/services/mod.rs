//! Application services for profile registration and lookup.

mod profiles;

pub use profiles::{
    ProfileService, ProfileServiceError, ProfileServiceResult, RegisterEmployeeRequest,
    RegisterManagerRequest,
};
