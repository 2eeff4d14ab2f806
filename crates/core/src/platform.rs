//! Source platforms and external-identifier extraction.
//!
//! Each supported platform publishes project pages under a fixed URL path
//! marker (`/3d-models/`, `/artwork/`, `/gallery/`). Extraction is a single
//! anchored pattern match against the segment following that marker; the
//! capture is taken verbatim, with query strings and fragments excluded.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `imported_from` tag for manual imports, which carry no external identity.
pub const MANUAL_SOURCE: &str = "manual";

/// A creative platform projects can be imported from.
///
/// The set is closed: adding a platform means adding a variant here and an
/// adapter arm in `folio-sources`, not loading plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Sketchfab,
    Artstation,
    Behance,
}

/// The submitted URL does not contain the platform's path marker.
#[derive(Debug, Clone, thiserror::Error)]
#[error("URL is not a valid {platform} project URL: {url}")]
pub struct ExtractError {
    pub platform: Platform,
    pub url: String,
}

static SKETCHFAB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"sketchfab\.com/3d-models/([^/?#]+)").expect("valid sketchfab pattern")
});
static ARTSTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"artstation\.com/artwork/([^/?#]+)").expect("valid artstation pattern")
});
static BEHANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"behance\.net/gallery/([^/?#]+)").expect("valid behance pattern")
});

impl Platform {
    /// Stable tag persisted in `imported_from` and used in API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sketchfab => "sketchfab",
            Self::Artstation => "artstation",
            Self::Behance => "behance",
        }
    }

    /// Whether the platform supports an inline interactive embed.
    ///
    /// Only Sketchfab serves an embeddable viewer; the others are
    /// image-gallery platforms.
    pub fn supports_embed(&self) -> bool {
        matches!(self, Self::Sketchfab)
    }

    /// Default project category when the caller supplies none.
    pub fn default_category(&self) -> &'static str {
        match self {
            Self::Sketchfab => "3D Modeling",
            Self::Artstation => "Digital Art",
            Self::Behance => "Design",
        }
    }

    /// Extract the platform-scoped external identifier from a project URL.
    ///
    /// The first capture group is returned verbatim; trailing query
    /// parameters and fragments never reach the capture. Pure, no side
    /// effects.
    pub fn extract_external_id(&self, url: &str) -> Result<String, ExtractError> {
        let re = match self {
            Self::Sketchfab => &*SKETCHFAB_RE,
            Self::Artstation => &*ARTSTATION_RE,
            Self::Behance => &*BEHANCE_RE,
        };
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExtractError {
                platform: *self,
                url: url.to_string(),
            })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_sketchfab_id_from_model_url() {
        let id = Platform::Sketchfab
            .extract_external_id("https://sketchfab.com/3d-models/abc123")
            .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn extraction_ignores_trailing_query_string() {
        let id = Platform::Sketchfab
            .extract_external_id("https://sketchfab.com/3d-models/abc123?utm_source=share")
            .unwrap();
        assert_eq!(id, "abc123");

        let id = Platform::Artstation
            .extract_external_id("https://www.artstation.com/artwork/Xk4mPz#comments")
            .unwrap();
        assert_eq!(id, "Xk4mPz");
    }

    #[test]
    fn extraction_ignores_trailing_path_segments() {
        let id = Platform::Behance
            .extract_external_id("https://www.behance.net/gallery/99887766/My-Brand-Identity")
            .unwrap();
        assert_eq!(id, "99887766");
    }

    #[test]
    fn identifier_case_is_preserved() {
        let id = Platform::Artstation
            .extract_external_id("https://www.artstation.com/artwork/AbCdEf")
            .unwrap();
        assert_eq!(id, "AbCdEf");
    }

    #[test]
    fn non_matching_url_fails_with_extract_error() {
        let err = Platform::Sketchfab
            .extract_external_id("https://example.com/not-a-model")
            .unwrap_err();
        assert_eq!(err.platform, Platform::Sketchfab);
        assert_eq!(err.url, "https://example.com/not-a-model");
    }

    #[test]
    fn wrong_platform_marker_does_not_match() {
        // An ArtStation URL is not a valid Sketchfab import source.
        assert!(Platform::Sketchfab
            .extract_external_id("https://www.artstation.com/artwork/Xk4mPz")
            .is_err());
    }

    #[test]
    fn platform_tags_are_stable() {
        assert_eq!(Platform::Sketchfab.as_str(), "sketchfab");
        assert_eq!(Platform::Artstation.as_str(), "artstation");
        assert_eq!(Platform::Behance.as_str(), "behance");
    }

    #[test]
    fn only_sketchfab_supports_embeds() {
        assert!(Platform::Sketchfab.supports_embed());
        assert!(!Platform::Artstation.supports_embed());
        assert!(!Platform::Behance.supports_embed());
    }
}
