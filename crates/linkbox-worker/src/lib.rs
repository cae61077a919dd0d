//! Scheduled maintenance for Linkbox.
//!
//! This crate provides:
//! - The [`MaintenanceTask`] trait for periodic background work
//! - A cron scheduler that runs registered tasks
//! - The expired-link sweep task

pub mod jobs;
pub mod scheduler;
pub mod task;

pub use jobs::LinkSweepTask;
pub use scheduler::CronScheduler;
pub use task::MaintenanceTask;
