//! Review ownership guard.
//!
//! A review belongs to the user who wrote it. Edits are constrained to the
//! author at the storage level (the caller's id is part of the update
//! predicate), deletes check ownership explicitly so the rejection can name
//! the reason.

use emporium_core::{Page, ProductId, ReviewId, UserId};

use crate::db::{ProductStore, ReviewStore};
use crate::error::AppError;
use crate::models::{NewReview, Review, ReviewEdit};

const INVALID_PRODUCT: &str = "Invalid product";
const INVALID_REVIEW: &str = "Invalid review";
const REVIEW_NOT_FOUND: &str = "Review not found";
const NOT_YOUR_REVIEW: &str = "You can only delete your own reviews!";

/// Guard for review creation, edit, and deletion.
pub struct ReviewService<'a> {
    reviews: &'a dyn ReviewStore,
}

impl<'a> ReviewService<'a> {
    /// Create a new review service.
    #[must_use]
    pub const fn new(reviews: &'a dyn ReviewStore) -> Self {
        Self { reviews }
    }

    /// Create a review on an existing product.
    ///
    /// Creation is the only operation that looks at the product catalog,
    /// so the product store travels as an argument rather than living on
    /// the service.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the product does not exist.
    pub async fn add(
        &self,
        products: &dyn ProductStore,
        caller: UserId,
        product_id: ProductId,
        review: NewReview,
    ) -> Result<Review, AppError> {
        if products.by_id(product_id).await?.is_none() {
            return Err(AppError::bad_request(INVALID_PRODUCT));
        }

        Ok(self
            .reviews
            .insert(caller, product_id, review.rating, &review.text)
            .await?)
    }

    /// Edit a review as its author.
    ///
    /// The caller's id is forced into the update predicate, so a forged
    /// payload can never touch another user's review; an update that
    /// matches no row is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArguments`] if no owned review matched.
    pub async fn edit(&self, caller: UserId, edit: &ReviewEdit) -> Result<(), AppError> {
        if !self.reviews.update(edit, caller).await? {
            return Err(AppError::invalid_arguments(INVALID_REVIEW));
        }
        Ok(())
    }

    /// Delete a review as its author and return the deleted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::BadRequest`] when the caller is not the author.
    pub async fn delete(&self, caller: UserId, id: ReviewId) -> Result<Review, AppError> {
        let review = self
            .reviews
            .by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(REVIEW_NOT_FOUND))?;

        if review.user_id != caller {
            return Err(AppError::bad_request(NOT_YOUR_REVIEW));
        }

        if !self.reviews.delete(id).await? {
            // Lost a race with another delete of the same review.
            return Err(AppError::not_found(REVIEW_NOT_FOUND));
        }

        Ok(review)
    }

    /// List one page of the caller's reviews.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Review>, AppError> {
        Ok(self.reviews.list_for_user(user_id, page).await?)
    }
}
