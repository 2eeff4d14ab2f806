use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration (JWT secrets, CORS origins, admin seed).
    pub config: Arc<ServerConfig>,
    /// Outbound metadata client for the import pipeline.
    pub sources: Arc<folio_sources::SourceClient>,
    /// Contact-form relay. `None` when SMTP is not configured.
    pub mailer: Option<Arc<folio_mailer::Mailer>>,
}
