//! Product store contract and Postgres repository.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use emporium_core::{Page, ProductId, SubCategoryId};

use super::{PAGE_SIZE, RepositoryError};
use crate::models::{Product, ValidatedFilter};

/// Collaborator contract for product persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Look up a product by id.
    async fn by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// List one page of the whole catalog.
    async fn list(&self, page: Page) -> Result<Vec<Product>, RepositoryError>;

    /// List one page of a sub-category.
    async fn list_by_sub_category(
        &self,
        sub_category_id: SubCategoryId,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// List one page of products whose description contains `query`.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Product>, RepositoryError>;

    /// List one page of products attached to an active offer.
    async fn list_in_offers(&self, page: Page) -> Result<Vec<Product>, RepositoryError>;

    /// List one page matching a validated filter descriptor.
    async fn filter(
        &self,
        filter: &ValidatedFilter,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Delete a product. Returns whether a row was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;
}

/// Postgres-backed product repository.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, description, price, picture_url, brand_id, sub_category_id, offer_id";

#[async_trait]
impl ProductStore for ProductRepository<'_> {
    async fn by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    async fn list_by_sub_category(
        &self,
        sub_category_id: SubCategoryId,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE sub_category_id = $1 ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(sub_category_id)
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE description ILIKE '%' || $1 || '%' ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(query)
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    async fn list_in_offers(&self, page: Page) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE offer_id IS NOT NULL ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(PAGE_SIZE)
        .bind(page.offset(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    async fn filter(
        &self,
        filter: &ValidatedFilter,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let criteria = filter.criteria();

        let mut builder = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"
        ));
        if let Some(brand_id) = criteria.brand_id {
            builder.push(" AND brand_id = ").push_bind(brand_id);
        }
        if let Some(sub_category_id) = criteria.sub_category_id {
            builder
                .push(" AND sub_category_id = ")
                .push_bind(sub_category_id);
        }
        if let Some(min_price) = criteria.min_price {
            builder.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = criteria.max_price {
            builder.push(" AND price <= ").push_bind(max_price);
        }
        builder
            .push(" ORDER BY id LIMIT ")
            .push_bind(PAGE_SIZE)
            .push(" OFFSET ")
            .push_bind(page.offset(PAGE_SIZE));

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
