//! Core types for Emporium.
//!
//! Type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod page;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use page::Page;
pub use role::Role;
