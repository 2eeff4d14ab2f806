use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use folio_core::error::CoreError;
use folio_core::platform::{ExtractError, Platform};
use folio_mailer::EmailError;
use folio_sources::FetchError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific and
/// import-pipeline variants. Implements [`IntoResponse`] to produce a
/// consistent `{"success": false, "message": ..., "code": ...}` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The submitted URL did not match the platform's pattern.
    #[error(transparent)]
    MalformedSourceUrl(#[from] ExtractError),

    /// The dedup guard found an existing record for this source pair.
    #[error("Project already imported: {platform}/{external_id}")]
    DuplicateImport {
        platform: Platform,
        external_id: String,
    },

    /// The source adapter could not retrieve platform metadata.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The contact relay failed to hand the message to SMTP.
    #[error(transparent)]
    Email(#[from] EmailError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Import pipeline errors ---
            AppError::MalformedSourceUrl(err) => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_SOURCE_URL",
                err.to_string(),
            ),
            AppError::DuplicateImport { .. } => (
                StatusCode::BAD_REQUEST,
                "DUPLICATE_IMPORT",
                "Project already imported".to_string(),
            ),
            AppError::Fetch(err) => {
                tracing::warn!(error = %err, "Metadata fetch failed");
                if err.is_timeout() {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "FETCH_TIMEOUT",
                        "Timed out retrieving external metadata".to_string(),
                    )
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "METADATA_FETCH_ERROR",
                        "Could not retrieve external metadata".to_string(),
                    )
                }
            }

            // --- Contact relay errors ---
            AppError::Email(err) => {
                tracing::error!(error = %err, "Contact relay failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMAIL_ERROR",
                    "Failed to send message. Please try again later.".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - A unique violation on the import-source index is the authoritative
///   "already imported" signal and maps to 400, matching the dedup guard.
/// - Other unique violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == "uq_projects_import_source" {
                    return (
                        StatusCode::BAD_REQUEST,
                        "DUPLICATE_IMPORT",
                        "Project already imported".to_string(),
                    );
                }
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                "A storage error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                "A storage error occurred".to_string(),
            )
        }
    }
}
