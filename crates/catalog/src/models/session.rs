//! Session-derived identity.
//!
//! Identity is resolved once per request from session state into an
//! immutable value and passed by parameter through the call chain. The
//! guards on [`Identity`] are pure functions returning typed errors; no
//! shared mutable session object is threaded through the core.

use serde::{Deserialize, Serialize};

use emporium_core::{Email, Role, UserId};

use crate::error::AppError;

/// Minimal identity stored in the session for a logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account ID.
    pub id: UserId,
    /// Account email.
    pub email: Email,
    /// Role resolved at login.
    pub role: Role,
}

/// The caller's identity for one request.
///
/// Anonymous callers resolve to `Guest`; a session with an attached account
/// resolves to `Known`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No authenticated identity attached to the session.
    Guest,
    /// An authenticated account.
    Known(CurrentUser),
}

impl Identity {
    /// The caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Guest => Role::Guest,
            Self::Known(user) => user.role,
        }
    }

    /// Require an authenticated caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for a guest.
    pub const fn require_user(&self) -> Result<&CurrentUser, AppError> {
        match self {
            Self::Guest => Err(AppError::Unauthorized),
            Self::Known(user) => Ok(user),
        }
    }

    /// Require an admin caller. Implies [`Self::require_user`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for a guest and
    /// [`AppError::Forbidden`] for a non-admin account.
    pub fn require_admin(&self) -> Result<&CurrentUser, AppError> {
        let user = match self.require_user() {
            Ok(user) => user,
            Err(err) => return Err(err),
        };
        if user.role.is_admin() {
            Ok(user)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
