//! Database configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// SQLite connection pool configuration.
///
/// The file location itself lives in [`super::StoreConfig::db_path`]; these
/// settings only shape the pool that opens it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// How long a statement waits on a locked database before failing.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Reject pool settings sqlx cannot honor.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_connections == 0 {
            return Err(AppError::configuration(
                "database.max_connections must be at least 1",
            ));
        }
        if self.connect_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "database.connect_timeout_seconds must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            busy_timeout_seconds: default_busy_timeout(),
        }
    }
}

fn default_max_connections() -> u32 {
    4
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_busy_timeout() -> u64 {
    5
}
