//! Account store contract and Postgres repository.
//!
//! Credential hashes live in their own table and never travel on the
//! domain [`User`] type; the repository returns them separately where the
//! account service needs to verify a password.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use emporium_core::{Email, Page, Role, UserId};

use super::{PAGE_SIZE, RepositoryError};
use crate::models::User;
use crate::models::user::{NewUser, ProfileEdit};

/// Collaborator contract for account persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an account by id.
    async fn by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Look up an account by email.
    async fn by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Fetch an account together with its password hash, by email.
    ///
    /// Returns `None` if no such account exists.
    async fn with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// Fetch the password hash of an existing account.
    async fn password_hash(&self, id: UserId) -> Result<Option<String>, RepositoryError>;

    /// Persist a new account with its password hash.
    ///
    /// Surfaces a duplicate email as [`RepositoryError::Conflict`].
    async fn create(&self, new_user: &NewUser, password_hash: &str)
    -> Result<User, RepositoryError>;

    /// Replace an account's password hash.
    async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError>;

    /// Update profile fields. Returns whether a row matched.
    async fn update_profile(&self, id: UserId, edit: &ProfileEdit)
    -> Result<bool, RepositoryError>;

    /// Mark an account as subscribed to the newsletter.
    async fn subscribe(&self, id: UserId) -> Result<bool, RepositoryError>;

    /// Delete an account. Returns whether a row was removed.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;

    /// List one page of all accounts.
    async fn list(&self, page: Page) -> Result<Vec<User>, RepositoryError>;
}

/// Postgres-backed account repository.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, phone, is_admin, subscribed, created_at";

/// Raw account row; converted to the domain type with email validation.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    is_admin: bool,
    subscribed: bool,
    created_at: DateTime<Utc>,
}

/// Account row joined with its credential hash.
#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            role: Role::from_admin_flag(row.is_admin),
            subscribed: row.subscribed,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserStore for UserRepository<'_> {
    async fn by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHashRow>(
            "SELECT u.id, u.email, u.first_name, u.last_name, u.phone,
                    u.is_admin, u.subscribed, u.created_at,
                    p.password_hash
             FROM users u
             JOIN user_passwords p ON u.id = p.user_id
             WHERE u.email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some((User::try_from(row.user)?, row.password_hash))),
            None => Ok(None),
        }
    }

    async fn password_hash(&self, id: UserId) -> Result<Option<String>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM user_passwords WHERE user_id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(|(hash,)| hash))
    }

    async fn create(
        &self,
        new_user: &NewUser,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, first_name, last_name, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.email)
        .bind(new_user.first_name.as_str())
        .bind(new_user.last_name.as_str())
        .bind(new_user.phone.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "email"))?;

        sqlx::query("INSERT INTO user_passwords (user_id, password_hash) VALUES ($1, $2)")
            .bind(row.id)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        User::try_from(row)
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE user_passwords SET password_hash = $1 WHERE user_id = $2",
        )
        .bind(password_hash)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn update_profile(
        &self,
        id: UserId,
        edit: &ProfileEdit,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET first_name = $1, last_name = $2, phone = $3 WHERE id = $4",
        )
        .bind(edit.first_name.as_str())
        .bind(edit.last_name.as_str())
        .bind(edit.phone.as_deref())
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn subscribe(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE users SET subscribed = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}
