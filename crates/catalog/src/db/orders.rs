//! Order store contract and Postgres repository.

use async_trait::async_trait;
use sqlx::PgPool;

use emporium_core::{Page, UserId};

use super::{PAGE_SIZE, RepositoryError};
use crate::models::Order;

/// Collaborator contract for the read-only order history.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// List one page of a user's orders, most recent first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Order>, RepositoryError>;
}

/// Postgres-backed order repository.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository<'_> {
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, address, total, created_at
             FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }
}
