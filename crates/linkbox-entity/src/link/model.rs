//! Link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored link row: an identifier, the serialized payload and its expiry.
///
/// Rows are inserted once and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LinkRecord {
    /// Short random identifier, primary key.
    pub id: String,
    /// Payload encoded as JSON text.
    pub data: String,
    /// Absolute Unix timestamp (seconds) after which the link is dead.
    pub expires_at: i64,
}

impl LinkRecord {
    /// Whether the link is dead at `now`.
    ///
    /// The comparison is strict: a link is still live during its expiry second.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at
    }

    /// Seconds of life left at `now`, zero once expired.
    pub fn remaining_seconds(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }

    /// Expiry as a UTC datetime, if representable.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// Data required to insert a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    /// Generated identifier.
    pub id: String,
    /// Payload encoded as JSON text.
    pub data: String,
    /// Absolute expiry timestamp.
    pub expires_at: i64,
}

/// Live/expired row counts for operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Rows still readable.
    pub live: u64,
    /// Rows past expiry awaiting a sweep or a lazy delete.
    pub expired: u64,
}

impl LinkStats {
    /// Total physically stored rows.
    pub fn total(&self) -> u64 {
        self.live + self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(expires_at: i64) -> LinkRecord {
        LinkRecord {
            id: "aB3xY9".to_string(),
            data: "{}".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_live_at_exact_expiry_second() {
        let link = record(1_000);
        assert!(!link.is_expired_at(999));
        assert!(!link.is_expired_at(1_000));
        assert!(link.is_expired_at(1_001));
    }

    #[test]
    fn test_remaining_seconds_saturates() {
        let link = record(1_000);
        assert_eq!(link.remaining_seconds(400), 600);
        assert_eq!(link.remaining_seconds(2_000), 0);
    }

    #[test]
    fn test_expires_at_utc() {
        let link = record(0);
        assert_eq!(
            link.expires_at_utc().map(|d| d.to_rfc3339()),
            Some("1970-01-01T00:00:00+00:00".to_string())
        );
    }
}
