//! Link repository implementation.

use sqlx::SqlitePool;
use tracing::debug;

use linkbox_core::error::{AppError, ErrorKind};
use linkbox_core::result::AppResult;
use linkbox_entity::link::{LinkRecord, LinkStats, NewLink};

/// Repository for link rows.
#[derive(Debug, Clone)]
pub struct LinkRepository {
    pool: SqlitePool,
}

impl LinkRepository {
    /// Create a new link repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close every pooled connection. Later queries fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert a new link.
    ///
    /// Returns `false` without writing when the identifier is already taken,
    /// so callers can pick another one instead of overwriting a live row.
    pub async fn insert(&self, link: &NewLink) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO links (id, data, expires_at) VALUES (?, ?, ?) \
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(&link.id)
        .bind(&link.data)
        .bind(link.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to insert link", e))?;

        Ok(result.rows_affected() == 1)
    }

    /// Find a link by identifier, regardless of expiry.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<LinkRecord>> {
        sqlx::query_as::<_, LinkRecord>("SELECT id, data, expires_at FROM links WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find link", e))
    }

    /// Delete a link. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete link", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every link with `expires_at < now` and return how many rows went.
    ///
    /// The count comes from the delete statement itself, so it is exactly the
    /// number of rows removed. When nothing has expired no write is issued.
    pub async fn delete_expired(&self, now: i64) -> AppResult<u64> {
        let pending: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE expires_at < ?)")
                .bind(now)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to select expired links", e)
                })?;

        if !pending {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM links WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to delete expired links", e)
            })?;

        debug!(removed = result.rows_affected(), "Expired links deleted");
        Ok(result.rows_affected())
    }

    /// Count live and expired rows at `now`.
    pub async fn stats(&self, now: i64) -> AppResult<LinkStats> {
        let (live, expired): (i64, i64) = sqlx::query_as(
            "SELECT \
               COALESCE(SUM(CASE WHEN expires_at >= ? THEN 1 ELSE 0 END), 0), \
               COALESCE(SUM(CASE WHEN expires_at < ? THEN 1 ELSE 0 END), 0) \
             FROM links",
        )
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to count links", e))?;

        Ok(LinkStats {
            live: live.max(0) as u64,
            expired: expired.max(0) as u64,
        })
    }

    /// List live links, soonest expiry first.
    pub async fn list_live(&self, now: i64, limit: u32) -> AppResult<Vec<LinkRecord>> {
        sqlx::query_as::<_, LinkRecord>(
            "SELECT id, data, expires_at FROM links WHERE expires_at >= ? \
             ORDER BY expires_at ASC, id ASC LIMIT ?",
        )
        .bind(now)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list links", e))
    }
}
