//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the repositories in `folio_db` and map errors via
//! [`crate::error::AppError`].

pub mod auth;
pub mod contact;
pub mod import;
pub mod project;
