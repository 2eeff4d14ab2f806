//! Source adapters: outbound metadata fetch for the supported platforms.
//!
//! [`SourceClient`] issues a single, timeout-bounded HTTP request per import
//! and maps each platform's response shape into
//! [`folio_core::metadata::NormalizedMetadata`]. Failures surface as a typed
//! [`FetchError`]; nothing here retries.

pub mod client;
pub mod error;

pub use client::{SourceClient, SourceConfig};
pub use error::FetchError;
