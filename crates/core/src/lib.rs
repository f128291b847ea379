//! Emporium Core - Shared types library.
//!
//! Common types used by the Emporium catalog service. The core crate contains
//! only types - no I/O, no database access, no HTTP. This keeps it lightweight
//! and usable from any component or test harness.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
