//! Service layer: validation and authorization guards in front of storage.
//!
//! Each service validates eagerly, fails fast on the first violated rule,
//! and then delegates a single call to its store. Services hold no state of
//! their own and are constructed per request over trait-object store
//! references, so tests can drive them against in-memory stores.

pub mod account;
pub mod attributes;
pub mod catalog;
pub mod favorites;
pub mod reviews;

pub use account::AccountService;
pub use attributes::AttributeService;
pub use catalog::{CatalogService, build_filter};
pub use favorites::FavoritesService;
pub use reviews::ReviewService;
