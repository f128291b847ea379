//! Caller roles for authorization decisions.

use serde::{Deserialize, Serialize};

/// Role attached to a resolved identity.
///
/// A closed set: anonymous callers are `Guest`, authenticated customers are
/// `User`, and staff accounts are `Admin`. Authorization checks are plain
/// functions of this value - no ad-hoc boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// No authenticated identity.
    Guest,
    /// Authenticated customer.
    User,
    /// Staff account with catalog management rights.
    Admin,
}

impl Role {
    /// Derive a role from the persisted admin flag of an account.
    #[must_use]
    pub const fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::User }
    }

    /// Whether this role grants catalog management rights.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role belongs to an authenticated account.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_admin_flag() {
        assert_eq!(Role::from_admin_flag(true), Role::Admin);
        assert_eq!(Role::from_admin_flag(false), Role::User);
    }

    #[test]
    fn test_authentication_predicates() {
        assert!(!Role::Guest.is_authenticated());
        assert!(Role::User.is_authenticated());
        assert!(Role::Admin.is_authenticated());
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
