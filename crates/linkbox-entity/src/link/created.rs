//! Value object returned when a link is created.

use serde::{Deserialize, Serialize};

/// Path segment under which the storefront serves stored payloads.
pub const ACCESS_PATH: &str = "access_data";

/// A freshly created link, ready to hand to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedLink {
    /// The link identifier.
    pub id: String,
    /// Absolute Unix expiry timestamp.
    pub expires_at: i64,
    /// Shareable URL resolving to the payload.
    pub url: String,
}

impl CreatedLink {
    /// Build the value object, deriving the URL from `base_url`.
    pub fn new(id: String, expires_at: i64, base_url: &str) -> Self {
        let url = access_url(base_url, &id);
        Self {
            id,
            expires_at,
            url,
        }
    }
}

/// Join `base_url` and the access path for `id` without doubling slashes.
pub fn access_url(base_url: &str, id: &str) -> String {
    format!("{}/{ACCESS_PATH}/{id}", base_url.trim_end_matches('/'))
}
