//! Application configuration schemas.
//!
//! All configuration structs are deserialized from an optional TOML file via
//! the `config` crate, overlaid by `LINKBOX__`-prefixed environment variables.
//! Every field carries a serde default, so a missing file yields
//! [`AppConfig::default`].

pub mod database;
pub mod logging;
pub mod store;
pub mod sweeper;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::store::StoreConfig;
pub use self::sweeper::SweeperConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "LINKBOX";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Link store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// SQLite pool settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Periodic sweep settings.
    #[serde(default)]
    pub sweeper: SweeperConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file plus environment overrides.
    ///
    /// The file is optional. Environment variables use `__` as the section
    /// separator, e.g. `LINKBOX__STORE__LINK_DURATION_SECONDS=60`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.store.validate()?;
        self.database.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write temp config");
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.db_path, "temporary_data_storage.db");
        assert_eq!(config.store.link_duration_seconds, 600);
        assert_eq!(config.store.id_length, 6);
        assert_eq!(config.sweeper.schedule, "0 */5 * * * *");
        assert!(config.sweeper.enabled);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("/nonexistent/linkbox/config.toml").expect("load");
        assert_eq!(config.store.link_duration_seconds, 600);
        assert_eq!(config.database.max_connections, 4);
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_toml(
            r#"
            [store]
            db_path = "data/links.db"
            link_duration_seconds = 30

            [sweeper]
            enabled = false
            "#,
        );

        let config = AppConfig::load(file.path().to_str().expect("utf-8 path")).expect("load");
        assert_eq!(config.store.db_path, "data/links.db");
        assert_eq!(config.store.link_duration_seconds, 30);
        assert_eq!(config.store.id_length, 6);
        assert!(!config.sweeper.enabled);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_rejects_zero_duration() {
        let file = write_toml(
            r#"
            [store]
            link_duration_seconds = 0
            "#,
        );

        let err = AppConfig::load(file.path().to_str().expect("utf-8 path")).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
