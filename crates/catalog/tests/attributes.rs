//! Attribute definition and association tests against in-memory stores.

mod support;

use emporium_catalog::db::AttributeStore;
use emporium_catalog::error::AppError;
use emporium_catalog::services::AttributeService;
use emporium_core::{AttributeId, ProductId, SubCategoryId};

use support::{MemoryAttributes, MemoryProducts, product};

// ============================================================================
// Definitions
// ============================================================================

#[tokio::test]
async fn define_creates_an_attribute() {
    let products = MemoryProducts::empty();
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let def = service
        .define("screen size", SubCategoryId::from(10))
        .await
        .unwrap();

    assert_eq!(def.name, "screen size");
    assert_eq!(def.sub_category_id, SubCategoryId::from(10));
}

#[tokio::test]
async fn define_rejects_duplicate_name() {
    let products = MemoryProducts::empty();
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    attributes.seed("screen size", 10);

    // Same name in another sub-category still collides; names are global
    let err = service
        .define("screen size", SubCategoryId::from(20))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Such attribute already exists"));
}

#[tokio::test]
async fn delete_rejects_unknown_attribute() {
    let products = MemoryProducts::empty();
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let err = service.delete(AttributeId::from(99)).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid attribute or product"));
}

// ============================================================================
// Associations
// ============================================================================

#[tokio::test]
async fn attach_returns_the_materialized_value() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let attr_id = attributes.seed("screen size", 10);

    let value = service
        .attach(ProductId::from(1), attr_id, "15.6\"".to_owned())
        .await
        .unwrap();

    assert_eq!(value.name, "screen size");
    assert_eq!(value.value, "15.6\"");
}

#[tokio::test]
async fn attach_checks_product_before_attribute() {
    let products = MemoryProducts::empty();
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    // Neither side exists; the product check comes first
    let err = service
        .attach(ProductId::from(1), AttributeId::from(1), "x".to_owned())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid product"));
}

#[tokio::test]
async fn attach_rejects_unknown_attribute() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let err = service
        .attach(ProductId::from(1), AttributeId::from(99), "x".to_owned())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid attribute or product"));
}

#[tokio::test]
async fn attach_rejects_sub_category_mismatch() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let attr_id = attributes.seed("screen size", 20);

    let err = service
        .attach(ProductId::from(1), attr_id, "x".to_owned())
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::InvalidArguments(ref msg) if msg == "Sub-category of product has to match the one of the attribute")
    );
}

#[tokio::test]
async fn attach_rejects_a_duplicate_association() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let attr_id = attributes.seed("screen size", 10);
    service
        .attach(ProductId::from(1), attr_id, "x".to_owned())
        .await
        .unwrap();

    let err = service
        .attach(ProductId::from(1), attr_id, "y".to_owned())
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Conflict(ref msg) if msg == "Attribute is already attached to this product")
    );
}

#[tokio::test]
async fn detach_removes_the_association() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let attr_id = attributes.seed("screen size", 10);
    service
        .attach(ProductId::from(1), attr_id, "x".to_owned())
        .await
        .unwrap();

    service.detach(ProductId::from(1), attr_id).await.unwrap();

    // Detaching twice fails; the edge is gone
    let err = service
        .detach(ProductId::from(1), attr_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid attribute or product"));
}

#[tokio::test]
async fn deleting_a_definition_drops_its_associations() {
    let products = MemoryProducts::with(vec![product(1, 10)]);
    let attributes = MemoryAttributes::new();
    let service = AttributeService::new(&products, &attributes);

    let attr_id = attributes.seed("screen size", 10);
    service
        .attach(ProductId::from(1), attr_id, "x".to_owned())
        .await
        .unwrap();

    service.delete(attr_id).await.unwrap();

    assert!(
        !attributes
            .detach(ProductId::from(1), attr_id)
            .await
            .unwrap()
    );
}
