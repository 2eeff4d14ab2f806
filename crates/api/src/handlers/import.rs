//! Handlers for the `/import` resource: the import pipeline.
//!
//! Each platform endpoint runs the same sequential pipeline: extract the
//! external identifier from the submitted URL, check for an existing record,
//! fetch and normalize platform metadata, render the embed fragment where
//! supported, and persist the canonical project exactly once. The manual
//! endpoint skips extraction and fetching and persists the caller's payload
//! directly.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use folio_core::embed::build_embed;
use folio_core::error::CoreError;
use folio_core::platform::{Platform, MANUAL_SOURCE};
use folio_db::models::project::{CreateProject, Project};
use folio_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for the platform import endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub source_url: String,
    /// Overrides the platform's default category when present.
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// Request body for `POST /import/manual`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualImportRequest {
    pub project_data: CreateProject,
}

/// Response for every import endpoint.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub project: Project,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/import/sketchfab
pub async fn import_sketchfab(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ImportRequest>,
) -> AppResult<(StatusCode, Json<ImportResponse>)> {
    import_from_platform(&state, Platform::Sketchfab, input).await
}

/// POST /api/import/artstation
pub async fn import_artstation(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ImportRequest>,
) -> AppResult<(StatusCode, Json<ImportResponse>)> {
    import_from_platform(&state, Platform::Artstation, input).await
}

/// POST /api/import/behance
pub async fn import_behance(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ImportRequest>,
) -> AppResult<(StatusCode, Json<ImportResponse>)> {
    import_from_platform(&state, Platform::Behance, input).await
}

/// POST /api/import/manual
///
/// Persist a caller-supplied payload directly, tagged as a manual import.
/// Manual imports carry no external identity and are exempt from the
/// import-source uniqueness constraint.
pub async fn import_manual(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ManualImportRequest>,
) -> AppResult<(StatusCode, Json<ImportResponse>)> {
    let mut project_data = input.project_data;
    project_data
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    project_data.imported_from = Some(MANUAL_SOURCE.to_string());
    project_data.external_id = None;

    let project = ProjectRepo::create(&state.pool, &project_data).await?;
    tracing::info!(project_id = project.id, title = %project.title, "Manual project imported");

    Ok((
        StatusCode::CREATED,
        Json(created_response(project)),
    ))
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the import pipeline for one platform URL.
///
/// Stages run strictly in sequence; every failure halts the pipeline before
/// any record is written, so no partial project is ever visible.
async fn import_from_platform(
    state: &AppState,
    platform: Platform,
    input: ImportRequest,
) -> AppResult<(StatusCode, Json<ImportResponse>)> {
    // Received: the source URL is the one required field.
    let source_url = input.source_url.trim();
    if source_url.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "sourceUrl is required".into(),
        )));
    }

    // Extracting.
    let external_id = platform.extract_external_id(source_url)?;
    tracing::info!(%platform, external_id, "Importing external project");

    // Checking: fast-path dedup lookup. The unique index on
    // (imported_from, external_id) remains the authoritative guard at
    // insert time.
    if ProjectRepo::find_by_import_source(&state.pool, platform.as_str(), &external_id)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateImport {
            platform,
            external_id,
        });
    }

    // Fetching.
    let metadata = state.sources.fetch_metadata(platform, &external_id).await?;

    // Building.
    let demo_embed = build_embed(platform, &external_id);

    // Persisting.
    let category = input
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| platform.default_category().to_string());

    let create = CreateProject {
        title: metadata.title,
        description: metadata
            .description
            .unwrap_or_else(|| format!("Imported from {platform}")),
        category,
        images: metadata.images,
        technologies: metadata.technologies,
        project_url: Some(source_url.to_string()),
        github_url: None,
        demo_embed,
        featured: input.featured.unwrap_or(false),
        imported_from: Some(platform.as_str().to_string()),
        external_id: Some(external_id.clone()),
        external_url: Some(source_url.to_string()),
        import_data: Some(metadata.raw),
    };

    let project = ProjectRepo::create(&state.pool, &create).await?;
    tracing::info!(%platform, external_id, project_id = project.id, "External project imported");

    Ok((StatusCode::CREATED, Json(created_response(project))))
}

fn created_response(project: Project) -> ImportResponse {
    ImportResponse {
        success: true,
        message: "Project imported successfully".to_string(),
        project,
    }
}
