//! Attribute store contract and Postgres repository.

use async_trait::async_trait;
use sqlx::PgPool;

use emporium_core::{AttributeId, Page, ProductId, SubCategoryId};

use super::{PAGE_SIZE, RepositoryError};
use crate::models::AttributeDefinition;

/// Collaborator contract for attribute definitions and associations.
///
/// Uniqueness of attribute names and of `(product, attribute)` edges is
/// backed by database constraints; `insert` and `attach` surface a
/// violation as [`RepositoryError::Conflict`] so the guards can translate
/// races into their domain outcome.
#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// Look up an attribute definition by id.
    async fn by_id(&self, id: AttributeId) -> Result<Option<AttributeDefinition>, RepositoryError>;

    /// Look up an attribute definition by exact name (case-sensitive).
    async fn by_name(&self, name: &str) -> Result<Option<AttributeDefinition>, RepositoryError>;

    /// List one page of attribute definitions.
    async fn list(&self, page: Page) -> Result<Vec<AttributeDefinition>, RepositoryError>;

    /// Persist a new attribute definition.
    async fn insert(
        &self,
        name: &str,
        sub_category_id: SubCategoryId,
    ) -> Result<AttributeDefinition, RepositoryError>;

    /// Delete an attribute definition. Returns whether a row was removed.
    async fn delete(&self, id: AttributeId) -> Result<bool, RepositoryError>;

    /// Attach an attribute to a product with a concrete value.
    async fn attach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
        value: &str,
    ) -> Result<(), RepositoryError>;

    /// Remove an association. Returns whether an edge was removed.
    async fn detach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
    ) -> Result<bool, RepositoryError>;
}

/// Postgres-backed attribute repository.
pub struct AttributeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttributeRepository<'a> {
    /// Create a new attribute repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttributeStore for AttributeRepository<'_> {
    async fn by_id(&self, id: AttributeId) -> Result<Option<AttributeDefinition>, RepositoryError> {
        let attribute = sqlx::query_as::<_, AttributeDefinition>(
            "SELECT id, name, sub_category_id FROM attributes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(attribute)
    }

    async fn by_name(&self, name: &str) -> Result<Option<AttributeDefinition>, RepositoryError> {
        let attribute = sqlx::query_as::<_, AttributeDefinition>(
            "SELECT id, name, sub_category_id FROM attributes WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(attribute)
    }

    async fn list(&self, page: Page) -> Result<Vec<AttributeDefinition>, RepositoryError> {
        let attributes = sqlx::query_as::<_, AttributeDefinition>(
            "SELECT id, name, sub_category_id FROM attributes ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(attributes)
    }

    async fn insert(
        &self,
        name: &str,
        sub_category_id: SubCategoryId,
    ) -> Result<AttributeDefinition, RepositoryError> {
        let attribute = sqlx::query_as::<_, AttributeDefinition>(
            "INSERT INTO attributes (name, sub_category_id)
             VALUES ($1, $2)
             RETURNING id, name, sub_category_id",
        )
        .bind(name)
        .bind(sub_category_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "attribute"))?;

        Ok(attribute)
    }

    async fn delete(&self, id: AttributeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM attributes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn attach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
        value: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO product_attributes (product_id, attribute_id, value)
             VALUES ($1, $2, $3)",
        )
        .bind(product_id)
        .bind(attribute_id)
        .bind(value)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "association"))?;

        Ok(())
    }

    async fn detach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM product_attributes WHERE product_id = $1 AND attribute_id = $2",
        )
        .bind(product_id)
        .bind(attribute_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
