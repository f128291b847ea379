//! Identity resolution for route handlers.
//!
//! The [`Auth`] extractor resolves the caller's [`Identity`] from the
//! session once per request. It never rejects: an anonymous caller
//! resolves to [`Identity::Guest`], and handlers apply the
//! `require_user` / `require_admin` guards themselves.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{CurrentUser, Identity, session::keys};

/// Extractor resolving the request's identity from the session.
///
/// # Example
///
/// ```rust,ignore
/// async fn delete_product(
///     Auth(identity): Auth,
///     Path(product_id): Path<i64>,
/// ) -> Result<Json<Product>, AppError> {
///     identity.require_admin()?;
///     // ...
/// }
/// ```
pub struct Auth(pub Identity);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Session is placed in extensions by SessionManagerLayer; a missing
        // layer or unreadable session state both resolve to Guest.
        let user: Option<CurrentUser> = match parts.extensions.get::<Session>() {
            Some(session) => session.get(keys::CURRENT_USER).await.ok().flatten(),
            None => None,
        };

        Ok(Self(user.map_or(Identity::Guest, Identity::Known)))
    }
}

/// Attach an authenticated user to the session under a fresh session id.
///
/// Used by both login and registration: any transition from guest to a
/// known identity rotates the session id before the user is stored.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn establish_session(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::CURRENT_USER, user).await
}

/// Clear the logged-in user and drop the session record (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
