//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// The user's name
    pub name: String,

    /// The user's email address
    pub email: String,

    /// The user's city
    pub city: String,
}

/// Edit command arguments.
///
/// Omitted fields keep the record's current values, mirroring a form edit
/// where untouched inputs stay prefilled.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the record to edit
    pub id: i64,

    /// Replace the name
    #[arg(long)]
    pub name: Option<String>,

    /// Replace the email address
    #[arg(long)]
    pub email: Option<String>,

    /// Replace the city
    #[arg(long)]
    pub city: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the record to delete
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for the list command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
