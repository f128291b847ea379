//! Persistence layer for the catalog `PostgreSQL` database.
//!
//! Each entity has a store trait (the collaborator contract the services
//! are written against) and a Postgres repository implementing it. Queries
//! use the runtime sqlx API; rows are converted to domain types at this
//! boundary, translating "no row" into an explicit `Option` rather than
//! letting absence propagate implicitly.
//!
//! ## Tables
//!
//! - `users`, `user_passwords` - accounts and their credential hashes
//! - `products` - the catalog
//! - `attributes`, `product_attributes` - definitions and associations
//! - `favorites` - user-to-product edges, composite primary key
//! - `reviews`
//! - `orders` - read-only order history
//! - `tower_sessions.session` - created by the session store itself
//!
//! Migrations live in `crates/catalog/migrations/` and are applied on
//! startup.

pub mod attributes;
pub mod favorites;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use attributes::{AttributeRepository, AttributeStore};
pub use favorites::{FavoriteRepository, FavoriteStore};
pub use orders::{OrderRepository, OrderStore};
pub use products::{ProductRepository, ProductStore};
pub use reviews::{ReviewRepository, ReviewStore};
pub use users::{UserRepository, UserStore};

/// Rows per page for every paged listing.
pub const PAGE_SIZE: i64 = 10;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. unique attribute name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique violations into [`Self::Conflict`].
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
