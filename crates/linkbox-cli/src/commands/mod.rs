//! CLI command definitions and dispatch.

pub mod config;
pub mod link;
pub mod maintenance;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use linkbox_core::config::AppConfig;
use linkbox_core::error::AppError;
use linkbox_service::LinkStore;

/// Linkbox — expiring link store administration
#[derive(Debug, Parser)]
#[command(name = "linkbox", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store a JSON payload and print its link
    Create(link::CreateArgs),
    /// Print the payload behind a link
    Get(link::GetArgs),
    /// List live links
    List(link::ListArgs),
    /// Delete all expired links
    Cleanup,
    /// Count live and expired links
    Stats,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Create(args) => link::create(args, &self.config, self.format).await,
            Commands::Get(args) => link::get(args, &self.config).await,
            Commands::List(args) => link::list(args, &self.config, self.format).await,
            Commands::Cleanup => maintenance::cleanup(&self.config, self.format).await,
            Commands::Stats => maintenance::stats(&self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: open the link store described by the configuration file
pub async fn open_store(config_path: &str) -> Result<LinkStore, AppError> {
    let config = load_config(config_path)?;
    LinkStore::open(&config.store, &config.database).await
}
