//! Embed fragment builder for platforms with an inline viewer.
//!
//! The external identifier originates from user-supplied URLs, so it is
//! escaped for the HTML attribute positions it is interpolated into.

use crate::platform::Platform;

/// Render the sandboxed embed fragment for a platform, if it supports one.
///
/// Returns `None` for platforms without an embeddable viewer; the caller
/// leaves `demoEmbed` unset in that case.
pub fn build_embed(platform: Platform, external_id: &str) -> Option<String> {
    if !platform.supports_embed() {
        return None;
    }
    let id = html_escape::encode_safe(external_id);
    Some(format!(
        r#"<div class="sketchfab-embed-wrapper">
  <iframe
    title="{id}"
    frameborder="0"
    allowfullscreen
    mozallowfullscreen="true"
    webkitallowfullscreen="true"
    allow="autoplay; fullscreen; xr-spatial-tracking"
    src="https://sketchfab.com/models/{id}/embed"
    width="100%"
    height="400">
  </iframe>
</div>"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sketchfab_fragment_references_the_identifier() {
        let fragment = build_embed(Platform::Sketchfab, "abc123").unwrap();
        assert!(fragment.contains("https://sketchfab.com/models/abc123/embed"));
        assert!(fragment.contains(r#"title="abc123""#));
    }

    #[test]
    fn gallery_platforms_yield_no_fragment() {
        assert!(build_embed(Platform::Artstation, "abc123").is_none());
        assert!(build_embed(Platform::Behance, "abc123").is_none());
    }

    #[test]
    fn markup_in_the_identifier_is_rendered_inert() {
        let fragment = build_embed(Platform::Sketchfab, r#""><script>alert(1)</script>"#).unwrap();
        assert!(!fragment.contains("<script>"));
        assert!(!fragment.contains(r#""">"#));
        assert!(fragment.contains("&lt;script&gt;"));
    }
}
