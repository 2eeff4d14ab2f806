//! Pure domain logic for the portfolio backend.
//!
//! This crate has no I/O: it provides the shared error and ID types, the
//! source-platform enum with its URL identifier extractor, the embed
//! fragment builder, and the normalized metadata shape produced by the
//! source adapters.

pub mod embed;
pub mod error;
pub mod metadata;
pub mod platform;
pub mod types;
