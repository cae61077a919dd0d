//! Maintenance task trait and the logged runner used by the scheduler.

use async_trait::async_trait;
use serde_json::Value;

use linkbox_core::result::AppResult;

/// A unit of periodic background work.
#[async_trait]
pub trait MaintenanceTask: Send + Sync + std::fmt::Debug {
    /// Stable task name used in logs.
    fn name(&self) -> &str;

    /// Run the task once, returning a JSON summary of what it did.
    async fn run(&self) -> AppResult<Value>;
}

/// Run a task and log its outcome. Failures are reported, never propagated,
/// so a bad run cannot take down the host process.
pub async fn run_logged(task: &dyn MaintenanceTask) -> Option<Value> {
    tracing::debug!(task = task.name(), "Running maintenance task");

    match task.run().await {
        Ok(summary) => {
            tracing::info!(task = task.name(), summary = %summary, "Maintenance task completed");
            Some(summary)
        }
        Err(e) => {
            tracing::error!(
                task = task.name(),
                error = %e,
                retryable = e.is_retryable(),
                "Maintenance task failed"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbox_core::error::AppError;

    #[derive(Debug)]
    struct Failing;

    #[async_trait]
    impl MaintenanceTask for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn run(&self) -> AppResult<Value> {
            Err(AppError::storage("database is locked"))
        }
    }

    #[tokio::test]
    async fn test_failure_is_contained() {
        assert!(run_logged(&Failing).await.is_none());
    }
}
