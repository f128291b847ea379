//! Favorites ledger.
//!
//! Add is idempotent; remove of an absent edge is an error. The asymmetry
//! is deliberate and mirrors observed product behavior - see the design
//! notes before changing either side.

use emporium_core::{Page, ProductId, UserId};

use crate::db::{FavoriteStore, ProductStore, RepositoryError};
use crate::error::AppError;
use crate::models::Product;

const INVALID_PRODUCT: &str = "Invalid product";
const NOT_IN_FAVORITES: &str = "You don't have this product in your favorites";

/// Guard for the user-to-product favorite edges.
pub struct FavoritesService<'a> {
    products: &'a dyn ProductStore,
    favorites: &'a dyn FavoriteStore,
}

impl<'a> FavoritesService<'a> {
    /// Create a new favorites service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore, favorites: &'a dyn FavoriteStore) -> Self {
        Self {
            products,
            favorites,
        }
    }

    /// Add a product to the caller's favorites.
    ///
    /// Idempotent: an existing edge is success, not a duplicate. A race on
    /// the composite key resolves the same way - the loser's constraint
    /// violation is treated as success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the product does not exist.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<Product, AppError> {
        let product = self
            .products
            .by_id(product_id)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_PRODUCT))?;

        if self.favorites.contains(user_id, product_id).await? {
            return Ok(product);
        }

        match self.favorites.insert(user_id, product_id).await {
            Ok(()) | Err(RepositoryError::Conflict(_)) => Ok(product),
            Err(other) => Err(AppError::Database(other)),
        }
    }

    /// Remove a product from the caller's favorites.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the product does not exist or
    /// the edge is absent.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Product, AppError> {
        let product = self
            .products
            .by_id(product_id)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_PRODUCT))?;

        if !self.favorites.remove(user_id, product_id).await? {
            return Err(AppError::bad_request(NOT_IN_FAVORITES));
        }

        Ok(product)
    }

    /// List one page of the caller's favorite products.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn list(&self, user_id: UserId, page: Page) -> Result<Vec<Product>, AppError> {
        Ok(self.favorites.list_products(user_id, page).await?)
    }
}
