//! Review store contract and Postgres repository.

use async_trait::async_trait;
use sqlx::PgPool;

use emporium_core::{Page, ProductId, ReviewId, UserId};

use super::{PAGE_SIZE, RepositoryError};
use crate::models::Review;
use crate::models::review::ReviewEdit;

/// Collaborator contract for review persistence.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Look up a review by id.
    async fn by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError>;

    /// Persist a new review for a product by a user.
    async fn insert(
        &self,
        user_id: UserId,
        product_id: ProductId,
        rating: i32,
        text: &str,
    ) -> Result<Review, RepositoryError>;

    /// Update a review, constrained to the given author.
    ///
    /// Returns whether a row matched both the review id and the author.
    async fn update(&self, edit: &ReviewEdit, author: UserId) -> Result<bool, RepositoryError>;

    /// Delete a review. Returns whether a row was removed.
    async fn delete(&self, id: ReviewId) -> Result<bool, RepositoryError>;

    /// List one page of a user's reviews.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Review>, RepositoryError>;
}

/// Postgres-backed review repository.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

const REVIEW_COLUMNS: &str = "id, user_id, product_id, rating, text, created_at";

#[async_trait]
impl ReviewStore for ReviewRepository<'_> {
    async fn by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(review)
    }

    async fn insert(
        &self,
        user_id: UserId,
        product_id: ProductId,
        rating: i32,
        text: &str,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (user_id, product_id, rating, text)
             VALUES ($1, $2, $3, $4)
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(user_id)
        .bind(product_id)
        .bind(rating)
        .bind(text)
        .fetch_one(self.pool)
        .await?;

        Ok(review)
    }

    async fn update(&self, edit: &ReviewEdit, author: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE reviews SET rating = $1, text = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(edit.rating)
        .bind(edit.text.as_str())
        .bind(edit.id)
        .bind(author)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews
             WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }
}
