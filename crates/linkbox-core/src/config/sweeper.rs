//! Background sweep configuration.

use serde::{Deserialize, Serialize};

/// Periodic expired-link sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweep job is scheduled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (seconds first).
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            schedule: default_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schedule() -> String {
    "0 */5 * * * *".to_string()
}
