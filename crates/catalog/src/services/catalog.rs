//! Product catalog queries and the filter engine.

use rust_decimal::Decimal;

use emporium_core::{Page, ProductId, SubCategoryId};

use crate::db::ProductStore;
use crate::error::AppError;
use crate::models::{Product, ProductFilter, ValidatedFilter};

const INVALID_PRODUCT: &str = "Invalid product";
const NO_FILTER_CRITERIA: &str = "no filter criteria";
const INVALID_FILTER_ARGUMENTS: &str = "invalid arguments";

/// Validate a sparse filter into a descriptor the store can execute.
///
/// Fail-fast order: no criteria at all, then any negative value, then an
/// inverted price range. Equal min and max prices are valid. The engine
/// performs no querying; the descriptor is forwarded verbatim.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for each violated rule.
pub fn build_filter(filter: ProductFilter) -> Result<ValidatedFilter, AppError> {
    if filter.is_empty() {
        return Err(AppError::bad_request(NO_FILTER_CRITERIA));
    }

    let negative_id = |id: i64| id < 0;
    if filter.brand_id.is_some_and(|id| negative_id(id.as_i64()))
        || filter
            .sub_category_id
            .is_some_and(|id| negative_id(id.as_i64()))
        || filter.min_price.is_some_and(|p| p < Decimal::ZERO)
        || filter.max_price.is_some_and(|p| p < Decimal::ZERO)
    {
        return Err(AppError::bad_request(INVALID_FILTER_ARGUMENTS));
    }

    if let (Some(min), Some(max)) = (filter.min_price, filter.max_price)
        && max < min
    {
        return Err(AppError::bad_request(INVALID_FILTER_ARGUMENTS));
    }

    Ok(ValidatedFilter::new(filter))
}

/// Catalog read and admin-delete operations.
pub struct CatalogService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Fetch a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] for an unknown id.
    pub async fn get(&self, id: ProductId) -> Result<Product, AppError> {
        self.products
            .by_id(id)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_PRODUCT))
    }

    /// List one page of the whole catalog.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn page(&self, page: Page) -> Result<Vec<Product>, AppError> {
        Ok(self.products.list(page).await?)
    }

    /// List one page of a sub-category.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn by_sub_category(
        &self,
        sub_category_id: SubCategoryId,
        page: Page,
    ) -> Result<Vec<Product>, AppError> {
        Ok(self
            .products
            .list_by_sub_category(sub_category_id, page)
            .await?)
    }

    /// Search product descriptions.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<Product>, AppError> {
        Ok(self.products.search(query, page).await?)
    }

    /// List one page of products in offers.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn offers(&self, page: Page) -> Result<Vec<Product>, AppError> {
        Ok(self.products.list_in_offers(page).await?)
    }

    /// Run a validated filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the filter fails validation.
    pub async fn filtered(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Vec<Product>, AppError> {
        let validated = build_filter(filter)?;
        Ok(self.products.filter(&validated, page).await?)
    }

    /// Delete a product (admin operation; role checked at the boundary).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if no such product exists.
    pub async fn delete(&self, id: ProductId) -> Result<(), AppError> {
        if !self.products.delete(id).await? {
            return Err(AppError::bad_request("There is no such product"));
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}
