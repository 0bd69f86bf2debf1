//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stepwise - apply and revert versioned SQL migrations
#[derive(Parser, Debug)]
#[command(name = "sw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the migrations directory
    #[arg(short = 'm', long, global = true)]
    pub migrations_dir: Option<String>,

    /// Override the database path (DuckDB file or :memory:)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Run every step outside a transaction
    #[arg(long, global = true)]
    pub no_transactions: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply all pending migrations
    Up(UpArgs),

    /// Migrate up or down to a specific version
    To(ToArgs),

    /// Print the current database version
    Version(VersionArgs),

    /// Report whether migrations are pending
    Pending(PendingArgs),

    /// Create an empty up/down script pair for the next version
    Create(CreateArgs),
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the to command
#[derive(Args, Debug)]
pub struct ToArgs {
    /// Target version (0 reverts everything)
    #[arg(allow_negative_numbers = true)]
    pub version: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the pending command
#[derive(Args, Debug)]
pub struct PendingArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Exit with status 2 when migrations are pending
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Migration name, e.g. create_users
    pub name: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
