//! Shared test helpers for integration tests.

#![allow(dead_code)]

use serde_json::Value;
use tempfile::TempDir;

use linkbox_core::config::{DatabaseConfig, StoreConfig};
use linkbox_database::DatabasePool;
use linkbox_service::LinkStore;

/// A store backed by a throwaway SQLite file.
pub struct TestStore {
    /// Keeps the directory alive for the duration of the test
    pub dir: TempDir,
    /// Settings the store was opened with
    pub settings: StoreConfig,
    /// The store under test
    pub store: LinkStore,
    /// Separate pool for direct inserts and assertions
    pub db: DatabasePool,
}

impl TestStore {
    /// Open a fresh store with the given link duration
    pub async fn new(link_duration_seconds: u64) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = StoreConfig {
            db_path: dir
                .path()
                .join("temporary_data_storage.db")
                .to_string_lossy()
                .into_owned(),
            link_duration_seconds,
            ..StoreConfig::default()
        };

        let store = LinkStore::open(&settings, &DatabaseConfig::default())
            .await
            .expect("Failed to open store");

        let db = DatabasePool::connect(&settings.db_path, &DatabaseConfig::default())
            .await
            .expect("Failed to open raw pool");

        Self {
            dir,
            settings,
            store,
            db,
        }
    }

    /// Construct a second store over the same file
    pub async fn reopen(&self) -> LinkStore {
        LinkStore::open(&self.settings, &DatabaseConfig::default())
            .await
            .expect("Failed to reopen store")
    }

    /// Insert a row directly, bypassing the store
    pub async fn insert_raw(&self, id: &str, payload: &Value, expires_at: i64) {
        sqlx::query("INSERT INTO links (id, data, expires_at) VALUES (?, ?, ?)")
            .bind(id)
            .bind(payload.to_string())
            .bind(expires_at)
            .execute(self.db.pool())
            .await
            .expect("Failed to insert raw link");
    }

    /// Run a statement directly against the file, e.g. to install a trigger
    pub async fn execute_raw(&self, sql: &str) {
        sqlx::query(sql)
            .execute(self.db.pool())
            .await
            .expect("Failed to execute raw statement");
    }

    /// Number of physical rows in the table
    pub async fn row_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count rows")
    }
}

/// Current Unix time in seconds
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
