//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for tinylink using clap's derive macros.

use clap::{Parser, Subcommand};

/// Tinylink - A small URL shortening service
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "A small URL shortening service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: ./config.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// List all short links, most clicked first
    List,

    /// Add a short link
    Add {
        /// Target URL
        url: String,

        /// Custom short code (random when omitted)
        #[arg(long)]
        code: Option<String>,
    },

    /// Delete a short link and its statistics
    Delete {
        /// Short code to delete
        short_code: String,
    },

    /// Show click statistics for a short link
    Stats {
        /// Short code to inspect
        short_code: String,
    },

    /// Remove links with no activity in the last N days
    Cleanup {
        /// Age threshold in days (default: storage.cleanup_days)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Whether this command runs the HTTP server
    pub fn is_server(&self) -> bool {
        matches!(self, Commands::Serve)
    }
}
