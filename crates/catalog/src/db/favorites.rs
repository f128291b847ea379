//! Favorite edge store contract and Postgres repository.

use async_trait::async_trait;
use sqlx::PgPool;

use emporium_core::{Page, ProductId, UserId};

use super::{PAGE_SIZE, RepositoryError};
use crate::models::Product;

/// Collaborator contract for the user-to-product favorite edges.
///
/// Edges have set semantics: a composite primary key keeps duplicates out
/// even when two requests race, surfacing the loser as
/// [`RepositoryError::Conflict`].
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Whether the edge exists.
    async fn contains(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError>;

    /// Insert the edge.
    async fn insert(&self, user_id: UserId, product_id: ProductId)
    -> Result<(), RepositoryError>;

    /// Remove the edge. Returns whether an edge was removed.
    async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError>;

    /// List one page of a user's favorite products.
    async fn list_products(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError>;
}

/// Postgres-backed favorites repository.
pub struct FavoriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteStore for FavoriteRepository<'_> {
    async fn contains(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1::BIGINT FROM favorites WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn insert(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO favorites (user_id, product_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool)
            .await
            .map_err(|e| RepositoryError::from_insert(e, "favorite"))?;

        Ok(())
    }

    async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_products(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT p.id, p.description, p.price, p.picture_url,
                    p.brand_id, p.sub_category_id, p.offer_id
             FROM products p
             JOIN favorites f ON f.product_id = p.id
             WHERE f.user_id = $1
             ORDER BY p.id LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
