//! Account, favorites, reviews and order-history route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tower_sessions::Session;

use emporium_core::{Page, ProductId, ReviewId, UserId};

use crate::db::{
    FavoriteRepository, OrderRepository, OrderStore, ProductRepository, ReviewRepository,
    UserRepository,
};
use crate::error::AppError;
use crate::middleware::{Auth, clear_current_user};
use crate::models::{
    ChangePassword, NewReview, Order, Product, ProfileEdit, Review, ReviewEdit, User,
};
use crate::services::{AccountService, FavoritesService, ReviewService};
use crate::state::AppState;

/// Own profile.
pub async fn profile(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Json<User>, AppError> {
    let caller = identity.require_user()?;
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    let user = service.user_by_id(caller.id).await?;
    Ok(Json(user))
}

/// Public profile of any account.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    let user = service.user_by_id(UserId::from(id)).await?;
    Ok(Json(user))
}

/// One page of all accounts, admin only.
pub async fn index(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(page): Path<i64>,
) -> Result<Json<Vec<User>>, AppError> {
    identity.require_admin()?;
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    let listing = service.list_users(Page::normalize(page)).await?;
    Ok(Json(listing))
}

/// Edit the caller's profile fields.
pub async fn edit_profile(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Json(payload): Json<ProfileEdit>,
) -> Result<StatusCode, AppError> {
    let caller = identity.require_user()?;
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    service.edit_profile(caller.id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete the caller's own account and end the session.
pub async fn delete_account(
    State(state): State<AppState>,
    Auth(identity): Auth,
    session: Session,
) -> Result<StatusCode, AppError> {
    let caller = identity.require_user()?;
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    service.delete_account(caller.id).await?;
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change the caller's password.
pub async fn change_password(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Json(payload): Json<ChangePassword>,
) -> Result<StatusCode, AppError> {
    let caller = identity.require_user()?;
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    service.change_password(caller.id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Subscribe the caller to the newsletter.
pub async fn subscribe(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<StatusCode, AppError> {
    let caller = identity.require_user()?;
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    service.subscribe(caller.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One page of the caller's order history, most recent first.
pub async fn orders(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(page): Path<i64>,
) -> Result<Json<Vec<Order>>, AppError> {
    let caller = identity.require_user()?;
    let orders = OrderRepository::new(state.pool());

    let listing = orders
        .list_for_user(caller.id, Page::normalize(page))
        .await?;
    Ok(Json(listing))
}

/// One page of the caller's favorite products.
pub async fn favorites(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(page): Path<i64>,
) -> Result<Json<Vec<Product>>, AppError> {
    let caller = identity.require_user()?;
    let products = ProductRepository::new(state.pool());
    let favorites = FavoriteRepository::new(state.pool());
    let service = FavoritesService::new(&products, &favorites);

    let listing = service
        .list(caller.id, Page::normalize(page))
        .await?;
    Ok(Json(listing))
}

/// Add a product to the caller's favorites. Adding an already-favorite
/// product is a no-op that still returns the product.
pub async fn add_favorite(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let caller = identity.require_user()?;
    let products = ProductRepository::new(state.pool());
    let favorites = FavoriteRepository::new(state.pool());
    let service = FavoritesService::new(&products, &favorites);

    let product = service.add(caller.id, ProductId::from(product_id)).await?;
    Ok(Json(product))
}

/// Remove a product from the caller's favorites.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let caller = identity.require_user()?;
    let products = ProductRepository::new(state.pool());
    let favorites = FavoriteRepository::new(state.pool());
    let service = FavoritesService::new(&products, &favorites);

    let product = service
        .remove(caller.id, ProductId::from(product_id))
        .await?;
    Ok(Json(product))
}

/// Create a review on a product.
pub async fn add_review(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(product_id): Path<i64>,
    Json(payload): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let caller = identity.require_user()?;
    let products = ProductRepository::new(state.pool());
    let reviews = ReviewRepository::new(state.pool());
    let service = ReviewService::new(&reviews);

    let review = service
        .add(&products, caller.id, ProductId::from(product_id), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// One page of the caller's own reviews.
pub async fn reviews(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(page): Path<i64>,
) -> Result<Json<Vec<Review>>, AppError> {
    let caller = identity.require_user()?;
    let reviews = ReviewRepository::new(state.pool());
    let service = ReviewService::new(&reviews);

    let listing = service
        .list_for_user(caller.id, Page::normalize(page))
        .await?;
    Ok(Json(listing))
}

/// Edit one of the caller's reviews. The target review id travels in the
/// payload; authorship is enforced against the session identity.
pub async fn edit_review(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Json(payload): Json<ReviewEdit>,
) -> Result<StatusCode, AppError> {
    let caller = identity.require_user()?;
    let reviews = ReviewRepository::new(state.pool());
    let service = ReviewService::new(&reviews);

    service.edit(caller.id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete one of the caller's reviews; the deleted review is echoed back.
pub async fn delete_review(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(review_id): Path<i64>,
) -> Result<Json<Review>, AppError> {
    let caller = identity.require_user()?;
    let reviews = ReviewRepository::new(state.pool());
    let service = ReviewService::new(&reviews);

    let review = service.delete(caller.id, ReviewId::from(review_id)).await?;
    Ok(Json(review))
}
