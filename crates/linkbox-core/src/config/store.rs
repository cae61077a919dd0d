//! Link store configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest accepted identifier length.
pub const MIN_ID_LENGTH: usize = 4;
/// Largest accepted identifier length.
pub const MAX_ID_LENGTH: usize = 64;

/// Expiring link store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite file backing the store.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Seconds added to the creation time to compute a link's expiry.
    #[serde(default = "default_link_duration")]
    pub link_duration_seconds: u64,
    /// Length of generated link identifiers.
    #[serde(default = "default_id_length")]
    pub id_length: usize,
    /// Number of fresh identifiers tried when an insert collides.
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,
    /// Base URL prepended to `/access_data/<id>` when building share URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl StoreConfig {
    /// Link lifetime in whole seconds, saturating at `i64::MAX`.
    pub fn ttl_seconds(&self) -> i64 {
        i64::try_from(self.link_duration_seconds).unwrap_or(i64::MAX)
    }

    /// Reject values the store cannot operate with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.db_path.trim().is_empty() {
            return Err(AppError::configuration("store.db_path must not be empty"));
        }
        if self.link_duration_seconds == 0 {
            return Err(AppError::configuration(
                "store.link_duration_seconds must be at least 1",
            ));
        }
        if i64::try_from(self.link_duration_seconds).is_err() {
            return Err(AppError::configuration(
                "store.link_duration_seconds is out of range",
            ));
        }
        if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&self.id_length) {
            return Err(AppError::configuration(format!(
                "store.id_length must be between {MIN_ID_LENGTH} and {MAX_ID_LENGTH}, got {}",
                self.id_length
            )));
        }
        if self.max_id_attempts == 0 {
            return Err(AppError::configuration(
                "store.max_id_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            link_duration_seconds: default_link_duration(),
            id_length: default_id_length(),
            max_id_attempts: default_max_id_attempts(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_db_path() -> String {
    "temporary_data_storage.db".to_string()
}

fn default_link_duration() -> u64 {
    600
}

fn default_id_length() -> usize {
    6
}

fn default_max_id_attempts() -> u32 {
    5
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}
