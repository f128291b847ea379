//! Product review domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use emporium_core::{ProductId, ReviewId, UserId};

/// A product review, owned exclusively by its creating user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// Unique review ID.
    pub id: ReviewId,
    /// Author of the review. Only the author may edit or delete it.
    pub user_id: UserId,
    /// Product the review is about.
    pub product_id: ProductId,
    /// Star rating.
    pub rating: i32,
    /// Free-form review text.
    pub text: String,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a review.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    /// Star rating.
    pub rating: i32,
    /// Free-form review text.
    pub text: String,
}

/// Payload for editing an existing review.
///
/// Deliberately carries no author field: the ownership guard supplies the
/// caller's id when delegating the update, so it cannot be forged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEdit {
    /// Review to edit.
    pub id: ReviewId,
    /// New star rating.
    pub rating: i32,
    /// New review text.
    pub text: String,
}
