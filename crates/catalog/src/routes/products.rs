//! Product browsing route handlers.
//!
//! All listing endpoints are pageable and open to anonymous callers;
//! deletion is admin only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use emporium_core::{Page, ProductId, SubCategoryId};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::middleware::Auth;
use crate::models::{Product, ProductFilter};
use crate::services::CatalogService;
use crate::state::AppState;

/// Product detail.
pub async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let products = ProductRepository::new(state.pool());
    let service = CatalogService::new(&products);

    let product = service.get(ProductId::from(product_id)).await?;
    Ok(Json(product))
}

/// One page of the whole catalog.
pub async fn index(
    State(state): State<AppState>,
    Path(page): Path<i64>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool());
    let service = CatalogService::new(&products);

    let listing = service.page(Page::normalize(page)).await?;
    Ok(Json(listing))
}

/// One page of products in a sub-category.
pub async fn by_sub_category(
    State(state): State<AppState>,
    Path((id, page)): Path<(i64, i64)>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool());
    let service = CatalogService::new(&products);

    let listing = service
        .by_sub_category(SubCategoryId::from(id), Page::normalize(page))
        .await?;
    Ok(Json(listing))
}

/// One page of products whose description matches a search term.
pub async fn search(
    State(state): State<AppState>,
    Path((query, page)): Path<(String, i64)>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool());
    let service = CatalogService::new(&products);

    let listing = service.search(&query, Page::normalize(page)).await?;
    Ok(Json(listing))
}

/// One page of products currently on offer.
pub async fn offers(
    State(state): State<AppState>,
    Path(page): Path<i64>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool());
    let service = CatalogService::new(&products);

    let listing = service.offers(Page::normalize(page)).await?;
    Ok(Json(listing))
}

/// One page of products matching the posted filter criteria.
///
/// The raw criteria are validated up front; an empty or contradictory
/// filter never reaches storage.
pub async fn filtered(
    State(state): State<AppState>,
    Path(page): Path<i64>,
    Json(payload): Json<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool());
    let service = CatalogService::new(&products);

    let listing = service
        .filtered(payload, Page::normalize(page))
        .await?;
    Ok(Json(listing))
}

/// Delete a product from the catalog, admin only.
pub async fn destroy(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(product_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    identity.require_admin()?;
    let products = ProductRepository::new(state.pool());
    let service = CatalogService::new(&products);

    service.delete(ProductId::from(product_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
