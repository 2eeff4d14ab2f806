//! Platform-agnostic metadata shape produced by source adapters.

use serde::{Deserialize, Serialize};

/// Normalized metadata for one external project.
///
/// Transient: assembled by a source adapter, consumed by the import
/// orchestrator, never persisted directly. The raw platform payload rides
/// along untouched so the created record can retain it for audit and
/// re-derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    /// Verbatim platform response body. Opaque to everything downstream of
    /// the adapter that produced it.
    pub raw: serde_json::Value,
}
