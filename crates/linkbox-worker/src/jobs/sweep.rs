//! Expired link sweep.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use linkbox_core::result::AppResult;
use linkbox_service::LinkStore;

use crate::task::MaintenanceTask;

/// Removes every expired link from the store.
#[derive(Debug, Clone)]
pub struct LinkSweepTask {
    /// Store to sweep.
    store: Arc<LinkStore>,
}

impl LinkSweepTask {
    /// Task name reported in logs and summaries.
    pub const NAME: &'static str = "link_sweep";

    /// Create a sweep task over a shared store.
    pub fn new(store: Arc<LinkStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MaintenanceTask for LinkSweepTask {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn run(&self) -> AppResult<Value> {
        let removed = self.store.cleanup().await?;

        Ok(serde_json::json!({
            "task": Self::NAME,
            "expired_links_removed": removed,
        }))
    }
}
