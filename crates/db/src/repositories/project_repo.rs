//! Repository for the `projects` table.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, images, technologies, \
     project_url, github_url, demo_embed, featured, \
     imported_from, external_id, external_url, import_data, \
     created_at, updated_at";

/// Provides CRUD operations and import-source lookups for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Inserting a fetch-based import that already exists violates the
    /// `uq_projects_import_source` index; callers treat that violation as
    /// the authoritative "already imported" signal.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, category, images, technologies,
                 project_url, github_url, demo_embed, featured,
                 imported_from, external_id, external_url, import_data)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.images)
            .bind(&input.technologies)
            .bind(&input.project_url)
            .bind(&input.github_url)
            .bind(&input.demo_embed)
            .bind(input.featured)
            .bind(&input.imported_from)
            .bind(&input.external_id)
            .bind(&input.external_url)
            .bind(&input.import_data)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Fast-path dedup lookup for the import pipeline.
    ///
    /// This is an optimization only: the unique index is what actually
    /// guarantees at-most-once ingestion under concurrent requests.
    pub async fn find_by_import_source(
        pool: &PgPool,
        imported_from: &str,
        external_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE imported_from = $1 AND external_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(imported_from)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// Count persisted rows for an import source pair.
    pub async fn count_by_import_source(
        pool: &PgPool,
        imported_from: &str,
        external_id: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects WHERE imported_from = $1 AND external_id = $2",
        )
        .bind(imported_from)
        .bind(external_id)
        .fetch_one(pool)
        .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    /// `updated_at` is refreshed on every call.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                images = COALESCE($5, images),
                technologies = COALESCE($6, technologies),
                project_url = COALESCE($7, project_url),
                github_url = COALESCE($8, github_url),
                demo_embed = COALESCE($9, demo_embed),
                featured = COALESCE($10, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.images)
            .bind(&input.technologies)
            .bind(&input.project_url)
            .bind(&input.github_url)
            .bind(&input.demo_embed)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
