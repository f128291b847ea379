//! Authentication route handlers.
//!
//! Login and registration resolve credentials through
//! [`AccountService`] and attach the resulting identity to the session.

use axum::{Json, extract::State, http::StatusCode};
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::{clear_current_user, establish_session};
use crate::models::{CurrentUser, LoginUser, RegisterUser, User};
use crate::services::AccountService;
use crate::state::AppState;

/// Handle login.
///
/// On success the user is written into the session under a fresh session
/// id; the response body is the account's public profile.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginUser>,
) -> Result<Json<User>, AppError> {
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    let user = service.login(&payload).await?;

    establish_session(
        &session,
        &CurrentUser {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        },
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(user))
}

/// Handle registration.
///
/// A fresh account is logged in right away: the new identity is written
/// into the session under a fresh session id, same as [`login`].
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let users = UserRepository::new(state.pool());
    let service = AccountService::new(&users);

    let user = service.register(payload).await?;

    establish_session(
        &session,
        &CurrentUser {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        },
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handle logout. Flushes the whole session record.
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}
