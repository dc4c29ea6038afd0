//! Error classification shared by every service.
//!
//! Each service keeps its own error enum; [`ErrorKind`] is the coarse
//! category callers branch on when mapping failures to a response.

use std::fmt;

/// Coarse category of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A task, leave request, or profile does not exist.
    NotFound,
    /// The caller's role or ownership does not permit the operation.
    Forbidden,
    /// A task or leave request status change is not permitted.
    InvalidTransition,
    /// Input failed validation.
    Validation,
    /// The feedback collaborator failed.
    ExternalService,
    /// The backing store failed.
    Persistence,
}

impl ErrorKind {
    /// Returns a stable lowercase label for logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidTransition => "invalid_transition",
            Self::Validation => "validation",
            Self::ExternalService => "external_service",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
