//! Link CLI commands: create, get, list.

use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;
use tokio::io::AsyncReadExt;

use crate::output::{self, OutputFormat};
use linkbox_core::error::{AppError, ErrorKind};
use linkbox_entity::link::LinkRecord;

/// Arguments for `create`
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// JSON payload; read from stdin when omitted
    #[arg(short, long)]
    pub data: Option<String>,
}

/// Arguments for `get`
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Link identifier
    pub id: String,
}

/// Arguments for `list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Maximum number of links to show
    #[arg(short, long, default_value_t = 50)]
    pub limit: u32,
}

/// Link display row
#[derive(Debug, Serialize, Tabled)]
struct LinkRow {
    /// Link ID
    id: String,
    /// Expires
    expires: String,
    /// Seconds left
    remaining: i64,
    /// Payload size in bytes
    bytes: usize,
}

impl LinkRow {
    fn from_record(record: &LinkRecord, now: i64) -> Self {
        Self {
            id: record.id.clone(),
            expires: format_timestamp(record),
            remaining: record.remaining_seconds(now),
            bytes: record.data.len(),
        }
    }
}

/// Store a payload
pub async fn create(
    args: &CreateArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let raw = match &args.data {
        Some(data) => data.clone(),
        None => read_stdin().await?,
    };
    let payload = parse_payload(&raw)?;

    let store = super::open_store(config_path).await?;
    let link = store.create_link(&payload).await?;

    match format {
        OutputFormat::Json => output::print_json(&link),
        OutputFormat::Table => {
            output::print_success(&format!("Link {} created", link.id));
            output::print_kv("URL", &link.url);
            output::print_kv(
                "Expires",
                &chrono::DateTime::from_timestamp(link.expires_at, 0)
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_else(|| link.expires_at.to_string()),
            );
        }
    }

    Ok(())
}

/// Print a stored payload
pub async fn get(args: &GetArgs, config_path: &str) -> Result<(), AppError> {
    let store = super::open_store(config_path).await?;
    let payload = store.retrieve(&args.id).await?;
    output::print_json(&payload);
    Ok(())
}

/// List live links
pub async fn list(args: &ListArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let store = super::open_store(config_path).await?;
    let records = store.list_live(args.limit).await?;

    let now = chrono::Utc::now().timestamp();
    let rows: Vec<LinkRow> = records
        .iter()
        .map(|r| LinkRow::from_record(r, now))
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Parse a CLI-supplied payload as JSON
fn parse_payload(raw: &str) -> Result<Value, AppError> {
    serde_json::from_str(raw.trim()).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Payload is not valid JSON: {}", e),
            e,
        )
    })
}

async fn read_stdin() -> Result<String, AppError> {
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf)
}

fn format_timestamp(record: &LinkRecord) -> String {
    record
        .expires_at_utc()
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| record.expires_at.to_string())
}
