//! Account lifecycle: registration, login, password change, profile.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use emporium_core::{Email, Page, UserId};

use crate::db::{RepositoryError, UserStore};
use crate::error::AppError;
use crate::models::User;
use crate::models::user::{ChangePassword, LoginUser, NewUser, ProfileEdit, RegisterUser};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 symbols";
const EMAIL_TAKEN: &str = "User with this email already exists";
const PASSWORDS_DONT_MATCH: &str = "Passwords don't match";
const INVALID_CREDENTIALS: &str = "Invalid email or password";
const WRONG_PASSWORD: &str = "Wrong password";

/// Account lifecycle guard.
pub struct AccountService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Register a new account.
    ///
    /// The password is trimmed before any check. Validation order is fixed:
    /// password policy, then email availability, then confirmation match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] for each violated rule.
    pub async fn register(&self, dto: RegisterUser) -> Result<User, AppError> {
        let password = dto.password.trim();
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(PASSWORD_TOO_SHORT));
        }

        let email =
            Email::parse(&dto.email).map_err(|e| AppError::bad_request(e.to_string()))?;

        if self.users.by_email(&email).await?.is_some() {
            return Err(AppError::bad_request(EMAIL_TAKEN));
        }

        if password != dto.confirm_password {
            return Err(AppError::bad_request(PASSWORDS_DONT_MATCH));
        }

        let password_hash = hash_password(password)?;
        let new_user = NewUser {
            email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            phone: dto.phone,
        };

        // A registration racing on the same email loses at the uniqueness
        // constraint; surface it as the same taken-email rejection.
        let user = self
            .users
            .create(&new_user, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AppError::bad_request(EMAIL_TAKEN),
                other => AppError::Database(other),
            })?;

        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Log an account in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArguments`] with one uniform message
    /// whether the email is unknown or the password check fails, so the
    /// endpoint cannot be used as a user-existence oracle.
    pub async fn login(&self, dto: &LoginUser) -> Result<User, AppError> {
        let Ok(email) = Email::parse(&dto.email) else {
            return Err(AppError::invalid_arguments(INVALID_CREDENTIALS));
        };

        let Some((user, password_hash)) = self.users.with_password_hash(&email).await? else {
            return Err(AppError::invalid_arguments(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &password_hash) {
            return Err(AppError::invalid_arguments(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    /// Change the caller's password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArguments`] if the old password does not
    /// verify or the new password and confirmation differ.
    pub async fn change_password(
        &self,
        caller: UserId,
        dto: &ChangePassword,
    ) -> Result<(), AppError> {
        let current_hash = self
            .users
            .password_hash(caller)
            .await?
            .ok_or_else(|| AppError::invalid_arguments(WRONG_PASSWORD))?;

        if !verify_password(&dto.old_password, &current_hash) {
            return Err(AppError::invalid_arguments(WRONG_PASSWORD));
        }

        if dto.new_password != dto.confirm_password {
            return Err(AppError::invalid_arguments(PASSWORDS_DONT_MATCH));
        }

        let new_hash = hash_password(&dto.new_password)?;
        self.users.update_password(caller, &new_hash).await?;

        Ok(())
    }

    /// Edit the caller's own profile.
    ///
    /// The target account is always the caller; the payload carries no id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the account no longer exists.
    pub async fn edit_profile(&self, caller: UserId, edit: &ProfileEdit) -> Result<(), AppError> {
        if !self.users.update_profile(caller, edit).await? {
            return Err(AppError::bad_request("There is no such user"));
        }
        Ok(())
    }

    /// Delete the caller's own account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the account no longer exists.
    pub async fn delete_account(&self, caller: UserId) -> Result<(), AppError> {
        if !self.users.delete(caller).await? {
            return Err(AppError::bad_request("There is no such user"));
        }
        tracing::info!(user_id = %caller, "account deleted");
        Ok(())
    }

    /// Subscribe the caller to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the account no longer exists.
    pub async fn subscribe(&self, caller: UserId) -> Result<(), AppError> {
        if !self.users.subscribe(caller).await? {
            return Err(AppError::bad_request("There is no such user"));
        }
        Ok(())
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] for an unknown id.
    pub async fn user_by_id(&self, id: UserId) -> Result<User, AppError> {
        self.users
            .by_id(id)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid id"))
    }

    /// List one page of all accounts (admin listing).
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn list_users(&self, page: Page) -> Result<Vec<User>, AppError> {
        Ok(self.users.list(page).await?)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored hash.
///
/// An unparseable hash verifies as false; the caller decides the error.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
