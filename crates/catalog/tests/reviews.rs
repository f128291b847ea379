//! Review ownership and lifecycle tests against in-memory stores.

mod support;

use emporium_catalog::error::AppError;
use emporium_catalog::models::{NewReview, ReviewEdit};
use emporium_catalog::services::ReviewService;
use emporium_core::{ProductId, ReviewId, UserId};

use support::{MemoryProducts, MemoryReviews, product};

fn new_review(text: &str) -> NewReview {
    NewReview {
        rating: 4,
        text: text.to_owned(),
    }
}

#[tokio::test]
async fn add_creates_a_review_for_an_existing_product() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    let review = service
        .add(&products, UserId::from(7), ProductId::from(1), new_review("solid"))
        .await
        .unwrap();

    assert_eq!(review.user_id, UserId::from(7));
    assert_eq!(review.product_id, ProductId::from(1));
    assert_eq!(review.rating, 4);
}

#[tokio::test]
async fn add_rejects_missing_product() {
    let products = MemoryProducts::empty();
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    let err = service
        .add(&products, UserId::from(7), ProductId::from(1), new_review("solid"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid product"));
}

#[tokio::test]
async fn edit_updates_own_review() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    let review = service
        .add(&products, UserId::from(7), ProductId::from(1), new_review("solid"))
        .await
        .unwrap();

    service
        .edit(
            UserId::from(7),
            &ReviewEdit {
                id: review.id,
                rating: 2,
                text: "changed my mind".to_owned(),
            },
        )
        .await
        .unwrap();

    let listing = service
        .list_for_user(UserId::from(7), 1.into())
        .await
        .unwrap();
    assert_eq!(listing[0].rating, 2);
    assert_eq!(listing[0].text, "changed my mind");
}

#[tokio::test]
async fn edit_cannot_touch_another_users_review() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    let review = service
        .add(&products, UserId::from(7), ProductId::from(1), new_review("solid"))
        .await
        .unwrap();

    // A forged edit by another caller matches no row
    let err = service
        .edit(
            UserId::from(8),
            &ReviewEdit {
                id: review.id,
                rating: 1,
                text: "vandalism".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidArguments(ref msg) if msg == "Invalid review"));

    let listing = service
        .list_for_user(UserId::from(7), 1.into())
        .await
        .unwrap();
    assert_eq!(listing[0].text, "solid");
}

#[tokio::test]
async fn delete_returns_the_deleted_review() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    let review = service
        .add(&products, UserId::from(7), ProductId::from(1), new_review("solid"))
        .await
        .unwrap();

    let deleted = service.delete(UserId::from(7), review.id).await.unwrap();
    assert_eq!(deleted.id, review.id);
    assert_eq!(deleted.text, "solid");

    let listing = service
        .list_for_user(UserId::from(7), 1.into())
        .await
        .unwrap();
    assert!(listing.is_empty());
}

#[tokio::test]
async fn delete_rejects_unknown_review() {
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    let err = service
        .delete(UserId::from(7), ReviewId::from(99))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Review not found"));
}

#[tokio::test]
async fn delete_rejects_another_users_review() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    let review = service
        .add(&products, UserId::from(7), ProductId::from(1), new_review("solid"))
        .await
        .unwrap();

    let err = service.delete(UserId::from(8), review.id).await.unwrap_err();
    assert!(
        matches!(err, AppError::BadRequest(ref msg) if msg == "You can only delete your own reviews!")
    );
}

#[tokio::test]
async fn listing_is_scoped_to_the_author() {
    let products = MemoryProducts::with(vec![product(1, 10), product(2, 10)]);
    let reviews = MemoryReviews::new();
    let service = ReviewService::new(&reviews);

    service
        .add(&products, UserId::from(7), ProductId::from(1), new_review("mine"))
        .await
        .unwrap();
    service
        .add(&products, UserId::from(8), ProductId::from(2), new_review("theirs"))
        .await
        .unwrap();

    let listing = service
        .list_for_user(UserId::from(7), 1.into())
        .await
        .unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].text, "mine");
}
