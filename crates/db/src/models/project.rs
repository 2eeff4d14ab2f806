//! Project entity model and DTOs.
//!
//! The wire format keeps the camelCase field names the frontend has always
//! consumed (`projectUrl`, `demoEmbed`, `importedFrom`, ...), while columns
//! stay snake_case.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use folio_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_embed: Option<String>,
    pub featured: bool,
    /// `"sketchfab"` / `"artstation"` / `"behance"` / `"manual"`, or `None`
    /// for hand-authored records.
    pub imported_from: Option<String>,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    /// Raw platform payload captured at import time. Opaque.
    pub import_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_embed: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub imported_from: Option<String>,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    pub import_data: Option<serde_json::Value>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_embed: Option<String>,
    pub featured: Option<bool>,
}
