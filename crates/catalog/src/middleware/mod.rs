//! HTTP middleware stack for the catalog service.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod session;

pub use auth::{Auth, clear_current_user, establish_session};
pub use session::create_session_layer;
