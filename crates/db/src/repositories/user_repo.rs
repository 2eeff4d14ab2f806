//! Repository for the `users` table.

use chrono::Utc;
use sqlx::PgPool;

use folio_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, password_hash, is_active, failed_login_count, \
     locked_until, last_login_at, created_at, updated_at";

/// Provides lookup and login-bookkeeping operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by their internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Increment the consecutive failed-login counter.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = failed_login_count + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Lock the account until the given time.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        locked_until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(locked_until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset the failure counter and record the login time.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = 0, locked_until = NULL,
                 last_login_at = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(())
    }
}
