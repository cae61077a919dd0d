//! The expiring link store.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use linkbox_core::config::{DatabaseConfig, StoreConfig};
use linkbox_core::error::{AppError, ErrorKind};
use linkbox_core::result::AppResult;
use linkbox_core::traits::{Clock, SystemClock};
use linkbox_database::migration::ensure_schema;
use linkbox_database::{DatabasePool, LinkRepository};
use linkbox_entity::link::{CreatedLink, LinkRecord, LinkStats, NewLink};

use super::id::{IdGenerator, RandomIdGenerator};

/// Stores JSON payloads behind short random identifiers with a fixed TTL.
///
/// Reads enforce expiry: a link past its expiry second is deleted by the read
/// that discovers it and reported as [`ErrorKind::Expired`]. Live links stay
/// readable until they expire; reading does not consume them.
#[derive(Debug, Clone)]
pub struct LinkStore {
    /// Repository over the `links` table.
    repo: Arc<LinkRepository>,
    /// Store settings (duration, id shape, public URL).
    settings: StoreConfig,
    /// Source of "now".
    clock: Arc<dyn Clock>,
    /// Source of candidate identifiers.
    ids: Arc<dyn IdGenerator>,
}

impl LinkStore {
    /// Open the store file described by `settings`, creating the schema if needed.
    pub async fn open(settings: &StoreConfig, database: &DatabaseConfig) -> AppResult<Self> {
        settings.validate()?;
        database.validate()?;

        let db = DatabasePool::connect(&settings.db_path, database).await?;
        ensure_schema(db.pool()).await?;

        Ok(Self::assemble(
            Arc::new(LinkRepository::new(db.into_pool())),
            settings.clone(),
        ))
    }

    /// Creates a store over an existing repository, using the system clock
    /// and random identifiers.
    ///
    /// Fails with [`ErrorKind::Configuration`] if `settings` do not validate.
    pub fn new(repo: Arc<LinkRepository>, settings: StoreConfig) -> AppResult<Self> {
        settings.validate()?;
        Ok(Self::assemble(repo, settings))
    }

    /// Close the underlying connection pool.
    pub async fn close(&self) {
        self.repo.close().await;
        info!(db_path = %self.settings.db_path, "Link store closed");
    }

    fn assemble(repo: Arc<LinkRepository>, settings: StoreConfig) -> Self {
        Self {
            repo,
            settings,
            clock: Arc::new(SystemClock),
            ids: Arc::new(RandomIdGenerator),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the identifier generator.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Store settings in effect.
    pub fn settings(&self) -> &StoreConfig {
        &self.settings
    }

    /// Store a payload and return its identifier.
    pub async fn create<T: Serialize + ?Sized>(&self, payload: &T) -> AppResult<String> {
        self.create_link(payload).await.map(|link| link.id)
    }

    /// Store a payload and return its identifier, expiry, and shareable URL.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Serialization`] if the payload has no JSON representation.
    /// - [`ErrorKind::Storage`] if the insert fails or every identifier
    ///   attempt collided with an existing row.
    pub async fn create_link<T: Serialize + ?Sized>(&self, payload: &T) -> AppResult<CreatedLink> {
        let data = serde_json::to_string(payload).map_err(|e| {
            warn!(error = %e, "Rejected payload that cannot be serialized");
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Payload cannot be serialized to JSON: {e}"),
                e,
            )
        })?;

        let expires_at = self
            .clock
            .now()
            .saturating_add(self.settings.ttl_seconds());
        let mut link = NewLink {
            id: String::new(),
            data,
            expires_at,
        };

        let attempts = self.settings.max_id_attempts;
        for attempt in 1..=attempts {
            link.id = self.ids.generate(self.settings.id_length);

            let inserted = self.repo.insert(&link).await.inspect_err(|e| {
                error!(link_id = %link.id, error = %e, "Failed to store link");
            })?;

            if inserted {
                info!(link_id = %link.id, expires_at, "Stored link");
                return Ok(CreatedLink::new(
                    link.id,
                    expires_at,
                    &self.settings.public_base_url,
                ));
            }

            warn!(link_id = %link.id, attempt, "Link id already taken, retrying");
        }

        error!(attempts, "Exhausted link id attempts");
        Err(AppError::storage(format!(
            "Could not allocate a unique link id after {attempts} attempts"
        )))
    }

    /// Resolve a link to its payload.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NotFound`] if no row has this identifier.
    /// - [`ErrorKind::Expired`] if the row is past its expiry; the row is
    ///   deleted on a best-effort basis first.
    /// - [`ErrorKind::CorruptData`] if the stored text is not valid JSON.
    /// - [`ErrorKind::Storage`] if the lookup itself fails.
    pub async fn retrieve(&self, id: &str) -> AppResult<Value> {
        let record = self
            .repo
            .find_by_id(id)
            .await
            .inspect_err(|e| error!(link_id = %id, error = %e, "Failed to look up link"))?
            .ok_or_else(|| AppError::not_found(format!("No such link: '{id}'")))?;

        if record.is_expired_at(self.clock.now()) {
            match self.repo.delete(id).await {
                Ok(_) => info!(link_id = %id, "Cleaned up expired link"),
                Err(e) => warn!(link_id = %id, error = %e, "Failed to delete expired link"),
            }
            return Err(AppError::expired(format!("Link '{id}' has expired")));
        }

        serde_json::from_str(&record.data).map_err(|e| {
            error!(link_id = %id, error = %e, "Stored link data is corrupt");
            AppError::with_source(
                ErrorKind::CorruptData,
                format!("Failed to decode stored data for link '{id}'"),
                e,
            )
        })
    }

    /// Delete every expired link and return how many were removed.
    pub async fn cleanup(&self) -> AppResult<u64> {
        match self.repo.delete_expired(self.clock.now()).await {
            Ok(0) => {
                debug!("No expired links to clean up");
                Ok(0)
            }
            Ok(count) => {
                info!(count, "Cleaned up expired links");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Expired link cleanup failed");
                Err(e)
            }
        }
    }

    /// Live and expired row counts.
    pub async fn stats(&self) -> AppResult<LinkStats> {
        self.repo.stats(self.clock.now()).await
    }

    /// Up to `limit` live links, soonest expiry first.
    pub async fn list_live(&self, limit: u32) -> AppResult<Vec<LinkRecord>> {
        self.repo.list_live(self.clock.now(), limit).await
    }
}
