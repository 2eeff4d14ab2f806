//! Refresh-token session model and DTOs.

use sqlx::FromRow;

use folio_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
