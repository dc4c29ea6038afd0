//! Roles and the caller context.

use super::{ParseRoleError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a user at registration. Immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Works on assigned tasks and files leave requests.
    Employee,
    /// Creates and assigns tasks, decides leave requests.
    Manager,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Authenticated caller supplied by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    user_id: UserId,
    role: Role,
}

impl Actor {
    /// Creates a caller context.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Creates an employee caller context.
    #[must_use]
    pub const fn employee(user_id: UserId) -> Self {
        Self::new(user_id, Role::Employee)
    }

    /// Creates a manager caller context.
    #[must_use]
    pub const fn manager(user_id: UserId) -> Self {
        Self::new(user_id, Role::Manager)
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` when the caller is a manager.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }

    /// Returns `true` when the caller is a manager or is `owner`.
    #[must_use]
    pub fn is_manager_or(&self, owner: Option<UserId>) -> bool {
        self.is_manager() || owner == Some(self.user_id)
    }
}
