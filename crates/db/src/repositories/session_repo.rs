//! Repository for the `sessions` table.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::session::{CreateSession, Session};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, created_at";

/// Provides refresh-token session operations.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live (unrevoked, unexpired) session by refresh-token digest.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session (token rotation).
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke every live session belonging to a user (logout).
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE sessions SET revoked_at = NOW() WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
