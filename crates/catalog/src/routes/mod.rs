//! HTTP route handlers for the catalog service.
//!
//! The handlers only extract, authorize via [`crate::middleware::Auth`],
//! call a service, and serialize the result as JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                 - Health check
//!
//! # Accounts (nested under /users)
//! POST   /users/login                          - Login
//! POST   /users/register                       - Register
//! POST   /users/logout                         - Logout
//! GET    /users/profile                        - Own profile (user)
//! GET    /users/{id}                           - Public profile
//! GET    /users/page/{page}                    - User listing (admin)
//! PUT    /users                                - Edit own profile (user)
//! DELETE /users                                - Delete own account (user)
//! PUT    /users/change_password                - Change password (user)
//! PUT    /users/subscribe                      - Subscribe to newsletter (user)
//! GET    /users/orders/page/{page}             - Own order history (user)
//!
//! # Favorites (user)
//! GET    /users/favorites/page/{page}          - Own favorites
//! POST   /users/favorites/{product_id}         - Add favorite (idempotent)
//! DELETE /users/favorites/{product_id}         - Remove favorite
//!
//! # Reviews (user)
//! POST   /users/reviews/{product_id}           - Create review
//! GET    /users/reviews/page/{page}            - Own reviews
//! PUT    /users/reviews                        - Edit own review
//! DELETE /users/reviews/{review_id}            - Delete own review
//!
//! # Products
//! GET    /products/{product_id}                - Product detail
//! GET    /products/page/{page}                 - Product listing
//! GET    /products/sub_categories/{id}/page/{page} - Listing by sub-category
//! GET    /products/search/{query}/page/{page}  - Text search
//! POST   /products/filters/page/{page}         - Filtered listing
//! DELETE /products/{product_id}                - Delete product (admin)
//! GET    /offers/page/{page}                   - Products on offer
//!
//! # Attributes (admin)
//! POST   /attributes                           - Define attribute
//! GET    /attributes/page/{page}               - Attribute listing
//! DELETE /attributes/{attribute_id}            - Delete attribute
//! POST   /products/{product_id}/attributes     - Attach to product
//! DELETE /products/{product_id}/attributes/{attribute_id} - Detach
//! ```

pub mod attributes;
pub mod auth;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the user account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/profile", get(users::profile))
        .route("/page/{page}", get(users::index))
        .route("/change_password", put(users::change_password))
        .route("/subscribe", put(users::subscribe))
        .route("/orders/page/{page}", get(users::orders))
        .route("/favorites/page/{page}", get(users::favorites))
        .route(
            "/favorites/{product_id}",
            post(users::add_favorite).delete(users::remove_favorite),
        )
        .route("/reviews", put(users::edit_review))
        .route("/reviews/page/{page}", get(users::reviews))
        .route(
            "/reviews/{id}",
            post(users::add_review).delete(users::delete_review),
        )
        .route("/{id}", get(users::show))
        .route(
            "/",
            put(users::edit_profile).delete(users::delete_account),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/page/{page}", get(products::index))
        .route(
            "/sub_categories/{id}/page/{page}",
            get(products::by_sub_category),
        )
        .route("/search/{query}/page/{page}", get(products::search))
        .route("/filters/page/{page}", post(products::filtered))
        .route(
            "/{product_id}",
            get(products::show).delete(products::destroy),
        )
        .route(
            "/{product_id}/attributes",
            post(attributes::attach),
        )
        .route(
            "/{product_id}/attributes/{attribute_id}",
            delete(attributes::detach),
        )
}

/// Create the offer routes router.
pub fn offer_routes() -> Router<AppState> {
    Router::new().route("/page/{page}", get(products::offers))
}

/// Create the attribute definition routes router.
pub fn attribute_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(attributes::define))
        .route("/page/{page}", get(attributes::index))
        .route("/{attribute_id}", delete(attributes::destroy))
}
