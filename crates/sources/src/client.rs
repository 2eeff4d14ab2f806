//! HTTP client for the supported creative platforms.
//!
//! One [`SourceClient`] serves all platforms; dispatch is a closed match
//! over [`Platform`]. Base URLs are configurable so tests can point the
//! client at a stub server.

use std::time::Duration;

use serde_json::Value;

use folio_core::metadata::NormalizedMetadata;
use folio_core::platform::Platform;

use crate::error::FetchError;

/// Default per-request deadline for metadata fetches.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

const DEFAULT_SKETCHFAB_BASE_URL: &str = "https://sketchfab.com";
const DEFAULT_ARTSTATION_BASE_URL: &str = "https://www.artstation.com";
const DEFAULT_BEHANCE_BASE_URL: &str = "https://api.behance.net";

/// Configuration for the outbound metadata client.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub sketchfab_base_url: String,
    pub artstation_base_url: String,
    pub behance_base_url: String,
    /// Deadline applied to every metadata request.
    pub fetch_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            sketchfab_base_url: DEFAULT_SKETCHFAB_BASE_URL.to_string(),
            artstation_base_url: DEFAULT_ARTSTATION_BASE_URL.to_string(),
            behance_base_url: DEFAULT_BEHANCE_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl SourceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                        |
    /// |---------------------------|--------------------------------|
    /// | `SKETCHFAB_BASE_URL`      | `https://sketchfab.com`        |
    /// | `ARTSTATION_BASE_URL`     | `https://www.artstation.com`   |
    /// | `BEHANCE_BASE_URL`        | `https://api.behance.net`      |
    /// | `SOURCE_FETCH_TIMEOUT_SECS` | `10`                         |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sketchfab_base_url: std::env::var("SKETCHFAB_BASE_URL")
                .unwrap_or(defaults.sketchfab_base_url),
            artstation_base_url: std::env::var("ARTSTATION_BASE_URL")
                .unwrap_or(defaults.artstation_base_url),
            behance_base_url: std::env::var("BEHANCE_BASE_URL")
                .unwrap_or(defaults.behance_base_url),
            fetch_timeout: std::env::var("SOURCE_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
        }
    }
}

/// Fetches and normalizes project metadata from external platforms.
pub struct SourceClient {
    http: reqwest::Client,
    config: SourceConfig,
}

impl SourceClient {
    /// Build a client with the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Fetch and normalize metadata for one external project.
    ///
    /// Single-shot: one GET against the platform's public metadata endpoint,
    /// no retries. The decoded body is preserved verbatim in the result's
    /// `raw` field.
    pub async fn fetch_metadata(
        &self,
        platform: Platform,
        external_id: &str,
    ) -> Result<NormalizedMetadata, FetchError> {
        let url = match platform {
            Platform::Sketchfab => format!(
                "{}/oembed?url=https://sketchfab.com/3d-models/{external_id}",
                self.config.sketchfab_base_url
            ),
            Platform::Artstation => format!(
                "{}/projects/{external_id}.json",
                self.config.artstation_base_url
            ),
            Platform::Behance => {
                format!("{}/v2/projects/{external_id}", self.config.behance_base_url)
            }
        };

        tracing::debug!(%platform, external_id, %url, "Fetching platform metadata");
        let raw = self.get_json(platform, external_id, &url).await?;

        let metadata = match platform {
            Platform::Sketchfab => normalize_sketchfab(external_id, raw),
            Platform::Artstation => normalize_artstation(external_id, raw),
            Platform::Behance => normalize_behance(external_id, raw),
        };

        tracing::info!(%platform, external_id, title = %metadata.title, "Fetched platform metadata");
        Ok(metadata)
    }

    async fn get_json(
        &self,
        platform: Platform,
        external_id: &str,
        url: &str,
    ) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(platform, external_id, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                platform,
                external_id: external_id.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    platform,
                    external_id: external_id.to_string(),
                }
            } else {
                FetchError::Malformed {
                    platform,
                    external_id: external_id.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

fn classify_transport_error(
    platform: Platform,
    external_id: &str,
    source: reqwest::Error,
) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout {
            platform,
            external_id: external_id.to_string(),
        }
    } else {
        FetchError::Request {
            platform,
            external_id: external_id.to_string(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-platform normalization
// ---------------------------------------------------------------------------

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_vec(values: Option<&Value>, key: &str) -> Vec<String> {
    values
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| string_field(item, key))
                .collect()
        })
        .unwrap_or_default()
}

/// Sketchfab oEmbed payload: `title`, `author_name`, `thumbnail_url`, ...
fn normalize_sketchfab(external_id: &str, raw: Value) -> NormalizedMetadata {
    let title =
        string_field(&raw, "title").unwrap_or_else(|| format!("Sketchfab Model - {external_id}"));
    let description = string_field(&raw, "description")
        .filter(|d| !d.is_empty())
        .or_else(|| Some("3D model from Sketchfab".to_string()));
    let images = string_field(&raw, "thumbnail_url").into_iter().collect();

    NormalizedMetadata {
        title,
        description,
        images,
        technologies: vec![
            "Blender".to_string(),
            "3D Modeling".to_string(),
            "Texturing".to_string(),
        ],
        raw,
    }
}

/// ArtStation project payload: `title`, `description`, `software_items`
/// (objects with `name`), `assets` (objects with `image_url`).
fn normalize_artstation(external_id: &str, raw: Value) -> NormalizedMetadata {
    let title =
        string_field(&raw, "title").unwrap_or_else(|| format!("ArtStation Artwork - {external_id}"));
    let description = string_field(&raw, "description")
        .filter(|d| !d.is_empty())
        .or_else(|| Some("Artwork from ArtStation".to_string()));

    let mut technologies = string_vec(raw.get("software_items"), "name");
    if technologies.is_empty() {
        technologies = vec!["Photoshop".to_string(), "Digital Painting".to_string()];
    }
    let images = string_vec(raw.get("assets"), "image_url");

    NormalizedMetadata {
        title,
        description,
        images,
        technologies,
        raw,
    }
}

/// Behance project payload: `{ "project": { "name", "description",
/// "fields" (strings), "covers" (size -> url) } }`.
fn normalize_behance(external_id: &str, raw: Value) -> NormalizedMetadata {
    let project = raw.get("project").cloned().unwrap_or(Value::Null);

    let title = string_field(&project, "name")
        .unwrap_or_else(|| format!("Behance Project - {external_id}"));
    let description = string_field(&project, "description")
        .filter(|d| !d.is_empty())
        .or_else(|| Some("Project from Behance".to_string()));

    let mut technologies: Vec<String> = project
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if technologies.is_empty() {
        technologies = vec!["UI/UX Design".to_string(), "Graphic Design".to_string()];
    }

    let images: Vec<String> = project
        .get("covers")
        .and_then(Value::as_object)
        .map(|covers| {
            covers
                .values()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    NormalizedMetadata {
        title,
        description,
        images,
        technologies,
        raw,
    }
}
