//! Idempotent schema bootstrap for the link table.

use sqlx::SqlitePool;
use tracing::info;

use linkbox_core::error::{AppError, ErrorKind};

/// Name of the single table backing the store.
pub const LINKS_TABLE: &str = "links";

const CREATE_LINKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS links (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    expires_at INTEGER NOT NULL
)";

const CREATE_EXPIRY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_links_expires_at ON links (expires_at)";

/// Create the `links` table unless it already exists.
///
/// Returns `true` when the table was created by this call. Existing data is
/// never touched.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<bool, AppError> {
    let existing: Option<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(LINKS_TABLE)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to inspect schema", e)
            })?;

    let created = if existing.is_some() {
        info!(table = LINKS_TABLE, "Link table already exists");
        false
    } else {
        sqlx::query(CREATE_LINKS_TABLE)
            .execute(pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create table '{LINKS_TABLE}': {e}"),
                    e,
                )
            })?;
        info!(table = LINKS_TABLE, "Link table initialized");
        true
    };

    sqlx::query(CREATE_EXPIRY_INDEX)
        .execute(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to create expiry index", e))?;

    Ok(created)
}
