//! CLI interface module
//!
//! Offline management commands that operate on the data file directly.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::TinylinkError;
use crate::runtime::lifetime::startup::prepare_link_service;
use commands::{add_link, cleanup_links, config_generate, delete_link, list_links, show_stats};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<TinylinkError> for CliError {
    fn from(err: TinylinkError) -> Self {
        match &err {
            TinylinkError::Validation(_)
            | TinylinkError::Conflict { .. }
            | TinylinkError::NotFound(_) => CliError::CommandError(match err.suggestion() {
                Some(s) => format!("{} (try: {})", err.message(), s),
                None => err.message().to_string(),
            }),
            TinylinkError::Config(msg) => CliError::ParseError(msg.clone()),
            _ => CliError::StorageError(err.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // Generate doesn't need the data file
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let service = prepare_link_service(config)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;

    match cmd {
        Commands::List => list_links(&service).await,
        Commands::Add { url, code } => add_link(&service, url, code).await,
        Commands::Delete { short_code } => delete_link(&service, short_code).await,
        Commands::Stats { short_code } => show_stats(&service, short_code).await,
        Commands::Cleanup { days } => cleanup_links(&service, days).await,
        Commands::Serve => unreachable!("server handled in main"),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
