//! Attribute association guard.
//!
//! Enforces the catalog consistency rule the storage layer alone cannot: an
//! attribute may only be attached to a product when their sub-categories
//! match. Also guards attribute name uniqueness ahead of the database
//! constraint.

use emporium_core::{AttributeId, Page, ProductId, SubCategoryId};

use crate::db::{AttributeStore, ProductStore, RepositoryError};
use crate::error::AppError;
use crate::models::{AttributeDefinition, ProductAttributeValue};

const INVALID_PRODUCT: &str = "Invalid product";
const INVALID_ATTRIBUTE_OR_PRODUCT: &str = "Invalid attribute or product";
const SUB_CATEGORIES_MISMATCH: &str =
    "Sub-category of product has to match the one of the attribute";
const ALREADY_EXISTS: &str = "Such attribute already exists";
const ALREADY_ATTACHED: &str = "Attribute is already attached to this product";

/// Attribute definitions and product associations guard.
pub struct AttributeService<'a> {
    products: &'a dyn ProductStore,
    attributes: &'a dyn AttributeStore,
}

impl<'a> AttributeService<'a> {
    /// Create a new attribute service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore, attributes: &'a dyn AttributeStore) -> Self {
        Self {
            products,
            attributes,
        }
    }

    /// Define a new attribute.
    ///
    /// Name matching is case-sensitive and exact. A concurrent definition
    /// of the same name loses at the uniqueness constraint and surfaces as
    /// the same conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already taken.
    pub async fn define(
        &self,
        name: &str,
        sub_category_id: SubCategoryId,
    ) -> Result<AttributeDefinition, AppError> {
        if self.attributes.by_name(name).await?.is_some() {
            return Err(AppError::conflict(ALREADY_EXISTS));
        }

        let attribute = self
            .attributes
            .insert(name, sub_category_id)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AppError::conflict(ALREADY_EXISTS),
                other => AppError::Database(other),
            })?;

        tracing::info!(attribute_id = %attribute.id, name, "attribute defined");
        Ok(attribute)
    }

    /// List one page of attribute definitions.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn list(&self, page: Page) -> Result<Vec<AttributeDefinition>, AppError> {
        Ok(self.attributes.list(page).await?)
    }

    /// Delete an attribute definition.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if no such attribute exists.
    pub async fn delete(&self, id: AttributeId) -> Result<(), AppError> {
        if !self.attributes.delete(id).await? {
            return Err(AppError::bad_request(INVALID_ATTRIBUTE_OR_PRODUCT));
        }
        Ok(())
    }

    /// Attach an attribute to a product with a concrete value.
    ///
    /// The sub-category match is checked here, at association time only;
    /// associations are never re-validated afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the product or attribute does
    /// not exist, [`AppError::InvalidArguments`] if their sub-categories
    /// differ, and [`AppError::Conflict`] if the attribute is already
    /// attached to the product.
    pub async fn attach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
        value: String,
    ) -> Result<ProductAttributeValue, AppError> {
        let product = self
            .products
            .by_id(product_id)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_PRODUCT))?;

        let attribute = self
            .attributes
            .by_id(attribute_id)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_ATTRIBUTE_OR_PRODUCT))?;

        if product.sub_category_id != attribute.sub_category_id {
            return Err(AppError::invalid_arguments(SUB_CATEGORIES_MISMATCH));
        }

        self.attributes
            .attach(product_id, attribute_id, &value)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AppError::conflict(ALREADY_ATTACHED),
                other => AppError::Database(other),
            })?;

        Ok(ProductAttributeValue::materialize(attribute, value))
    }

    /// Remove an attribute from a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the association does not exist.
    pub async fn detach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
    ) -> Result<(), AppError> {
        if !self.attributes.detach(product_id, attribute_id).await? {
            return Err(AppError::bad_request(INVALID_ATTRIBUTE_OR_PRODUCT));
        }
        Ok(())
    }
}
