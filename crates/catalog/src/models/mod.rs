//! Domain models for the catalog service.
//!
//! These types are validated domain objects, separate from database row
//! types. Persistence rows are converted at the repository boundary.

pub mod attribute;
pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod user;

pub use attribute::{AttributeDefinition, ProductAttributeValue};
pub use order::Order;
pub use product::{Product, ProductFilter, ValidatedFilter};
pub use review::{NewReview, Review, ReviewEdit};
pub use session::{CurrentUser, Identity};
pub use user::{ChangePassword, LoginUser, NewUser, ProfileEdit, RegisterUser, User};
