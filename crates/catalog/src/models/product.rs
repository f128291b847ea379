//! Product domain types and the catalog filter descriptor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use emporium_core::{BrandId, OfferId, ProductId, SubCategoryId};

/// A catalog product.
///
/// Immutable once fetched within a request; mutation happens only through
/// the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product description shown in listings.
    pub description: String,
    /// Unit price, non-negative.
    pub price: Decimal,
    /// URL of the product picture.
    pub picture_url: String,
    /// Brand the product belongs to.
    pub brand_id: BrandId,
    /// Sub-category the product belongs to.
    pub sub_category_id: SubCategoryId,
    /// Active offer, if the product is discounted.
    pub offer_id: Option<OfferId>,
}

/// Sparse filter criteria for product listings.
///
/// All fields are optional; at least one must be set for the filter to be
/// usable (see [`crate::services::catalog::build_filter`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Restrict to a brand.
    pub brand_id: Option<BrandId>,
    /// Restrict to a sub-category.
    pub sub_category_id: Option<SubCategoryId>,
    /// Lowest acceptable price (inclusive).
    pub min_price: Option<Decimal>,
    /// Highest acceptable price (inclusive).
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Whether no criteria are set at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand_id.is_none()
            && self.sub_category_id.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

/// A filter that has passed validation.
///
/// Opaque to callers: it can only be produced by the filter engine and is
/// forwarded verbatim to the product store, which performs the querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFilter {
    filter: ProductFilter,
}

impl ValidatedFilter {
    /// Wrap criteria that the filter engine has already validated.
    pub(crate) const fn new(filter: ProductFilter) -> Self {
        Self { filter }
    }

    /// The validated criteria.
    #[must_use]
    pub const fn criteria(&self) -> &ProductFilter {
        &self.filter
    }
}
