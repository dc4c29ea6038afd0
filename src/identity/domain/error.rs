//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The profile name is empty after trimming.
    #[error("profile name must not be empty")]
    EmptyName,

    /// The manager salary is negative or not a finite number.
    #[error("salary must be a finite, non-negative amount")]
    InvalidSalary,
}

/// Error returned while parsing roles from persistence or request input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
