//! Store maintenance CLI commands.

use serde_json::json;

use crate::output::{self, OutputFormat};
use linkbox_core::error::AppError;

/// Run one sweep of expired links
pub async fn cleanup(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let store = super::open_store(config_path).await?;
    let count = store.cleanup().await?;

    match format {
        OutputFormat::Json => output::print_json(&json!({ "cleaned_count": count })),
        OutputFormat::Table if count == 0 => println!("No expired links found."),
        OutputFormat::Table => output::print_success(&format!("Cleaned up {} expired links", count)),
    }

    Ok(())
}

/// Show live/expired counts
pub async fn stats(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let store = super::open_store(config_path).await?;
    let stats = store.stats().await?;

    match format {
        OutputFormat::Json => output::print_json(&stats),
        OutputFormat::Table => {
            output::print_kv("Store", &store.settings().db_path);
            output::print_kv("Live links", &stats.live.to_string());
            output::print_kv("Expired (pending sweep)", &stats.expired.to_string());
            output::print_kv("Total rows", &stats.total().to_string());
        }
    }

    Ok(())
}
