//! Attribute definition and association route handlers, admin only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use emporium_core::{AttributeId, Page, ProductId, SubCategoryId};

use crate::db::{AttributeRepository, ProductRepository};
use crate::error::AppError;
use crate::middleware::Auth;
use crate::models::{AttributeDefinition, ProductAttributeValue};
use crate::services::AttributeService;
use crate::state::AppState;

/// Payload for defining a new attribute.
#[derive(Debug, Deserialize)]
pub struct DefineAttribute {
    pub name: String,
    pub sub_category_id: SubCategoryId,
}

/// Payload for attaching an attribute to a product.
#[derive(Debug, Deserialize)]
pub struct AttachAttribute {
    pub attribute_id: AttributeId,
    pub value: String,
}

/// Define a new attribute for a sub-category.
pub async fn define(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Json(payload): Json<DefineAttribute>,
) -> Result<(StatusCode, Json<AttributeDefinition>), AppError> {
    identity.require_admin()?;
    let products = ProductRepository::new(state.pool());
    let attributes = AttributeRepository::new(state.pool());
    let service = AttributeService::new(&products, &attributes);

    let attribute = service
        .define(&payload.name, payload.sub_category_id)
        .await?;
    Ok((StatusCode::CREATED, Json(attribute)))
}

/// One page of attribute definitions.
pub async fn index(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(page): Path<i64>,
) -> Result<Json<Vec<AttributeDefinition>>, AppError> {
    identity.require_admin()?;
    let products = ProductRepository::new(state.pool());
    let attributes = AttributeRepository::new(state.pool());
    let service = AttributeService::new(&products, &attributes);

    let listing = service.list(Page::normalize(page)).await?;
    Ok(Json(listing))
}

/// Delete an attribute definition and all its associations.
pub async fn destroy(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(attribute_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    identity.require_admin()?;
    let products = ProductRepository::new(state.pool());
    let attributes = AttributeRepository::new(state.pool());
    let service = AttributeService::new(&products, &attributes);

    service.delete(AttributeId::from(attribute_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach an attribute to a product with a concrete value.
pub async fn attach(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(product_id): Path<i64>,
    Json(payload): Json<AttachAttribute>,
) -> Result<(StatusCode, Json<ProductAttributeValue>), AppError> {
    identity.require_admin()?;
    let products = ProductRepository::new(state.pool());
    let attributes = AttributeRepository::new(state.pool());
    let service = AttributeService::new(&products, &attributes);

    let value = service
        .attach(
            ProductId::from(product_id),
            payload.attribute_id,
            payload.value,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(value)))
}

/// Remove an attribute from a product.
pub async fn detach(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path((product_id, attribute_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    identity.require_admin()?;
    let products = ProductRepository::new(state.pool());
    let attributes = AttributeRepository::new(state.pool());
    let service = AttributeService::new(&products, &attributes);

    service
        .detach(ProductId::from(product_id), AttributeId::from(attribute_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
