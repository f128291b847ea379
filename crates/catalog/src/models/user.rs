//! Account domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use emporium_core::{Email, Role, UserId};

/// A registered account (domain type).
///
/// The password hash is never part of this type; repositories return it
/// separately where credential verification needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique across accounts.
    pub email: Email,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact phone, if provided.
    pub phone: Option<String>,
    /// Resolved role (`User` or `Admin`; never `Guest` for a stored account).
    pub role: Role,
    /// Whether the account receives the newsletter.
    pub subscribed: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// A validated account ready to be persisted.
///
/// Produced by the account service after the registration payload has
/// passed the password policy and email parsing.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: Email,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    /// Login email.
    pub email: String,
    /// Plaintext password; trimmed and policy-checked before hashing.
    pub password: String,
    /// Password confirmation; must match `password` exactly.
    pub confirm_password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Password change payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePassword {
    /// Current password, verified before any change.
    pub old_password: String,
    /// New password.
    pub new_password: String,
    /// New password confirmation; must match `new_password` exactly.
    pub confirm_password: String,
}

/// Profile edit payload.
///
/// Carries no account id: the caller's id from the session is used, so a
/// caller can never edit another user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEdit {
    /// New first name.
    pub first_name: String,
    /// New last name.
    pub last_name: String,
    /// New contact phone.
    #[serde(default)]
    pub phone: Option<String>,
}
