//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use linkbox_core::error::AppError;

use crate::task::{MaintenanceTask, run_logged};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler })
    }

    /// Run `task` on the six-field cron `schedule` (seconds first).
    ///
    /// An unparsable schedule is a configuration error.
    pub async fn register(
        &self,
        task: Arc<dyn MaintenanceTask>,
        schedule: &str,
    ) -> Result<(), AppError> {
        let name = task.name().to_string();

        let job_task = Arc::clone(&task);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let task = Arc::clone(&job_task);
            Box::pin(async move {
                run_logged(task.as_ref()).await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid schedule '{}' for {}: {}",
                schedule, name, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add {} schedule: {}", name, e))
        })?;

        tracing::info!(task = %name, schedule, "Registered maintenance task");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
