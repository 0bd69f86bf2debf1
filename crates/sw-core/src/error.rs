//! Error types for sw-core

use crate::migration::Direction;
use thiserror::Error;

/// Canonical filename pattern reported when no better suggestion exists.
pub const DEFAULT_FILENAME_PATTERN: &str = "0001_name.up.sql";

/// Core error type for Stepwise
#[derive(Error, Debug)]
pub enum MigrateError {
    /// SW001: Migration filename does not follow `<version>_<name>.<direction>.sql`
    #[error("[SW001] Bad migration filename: {filename} (should be {expected})")]
    BadFilename { filename: String, expected: String },

    /// SW002: Up and down scripts of one version disagree on the name
    #[error("[SW002] Migration {version} up and down migration names don't match (\"{up_name}\" != \"{down_name}\")")]
    NameMismatch {
        version: u32,
        up_name: String,
        down_name: String,
    },

    /// SW003: A required script is absent
    #[error("[SW003] Missing {direction} migration {version}")]
    MissingMigration { version: u32, direction: Direction },

    /// SW004: The ledger records a version no script exists for
    #[error("[SW004] Ledger has more migrations than filesystem: version {version} has no script")]
    FilesystemMissing { version: u32 },

    /// SW005: Ledger and filesystem disagree on the name of a version
    #[error("[SW005] Ledger migration {version} ({ledger_name}) doesn't match filesystem ({filesystem_name})")]
    LedgerMismatch {
        version: u32,
        ledger_name: String,
        filesystem_name: String,
    },

    /// SW006: Requested target version is out of range
    #[error("[SW006] Bad migration ({version}): {problem}")]
    BadTarget { version: i64, problem: String },

    /// SW007: Migration path exists but is not a directory
    #[error("[SW007] Migration path exists, but is not a directory: {path}")]
    BadSourcePath { path: String },

    /// SW008: A step failed inside the ledger adapter
    #[error("[SW008] Running {direction} migration {version} failed: {source}")]
    Step {
        version: u32,
        direction: Direction,
        #[source]
        source: LedgerError,
    },

    /// SW009: Ledger access failed outside of a step
    #[error("[SW009] {0}")]
    Ledger(#[from] LedgerError),

    /// SW010: Stepping was cancelled between steps
    #[error("[SW010] Migration cancelled at version {version}")]
    Cancelled { version: u32 },

    /// SW011: IO error with path context
    #[error("[SW011] IO error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// SW012: Configuration file not found
    #[error("[SW012] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// SW013: Invalid configuration value
    #[error("[SW013] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// SW014: Configuration YAML parse error
    #[error("[SW014] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// SW015: A step's script could not be read
    #[error("[SW015] Reading {direction} script for migration {version} failed: {source}")]
    ScriptRead {
        version: u32,
        direction: Direction,
        #[source]
        source: Box<MigrateError>,
    },
}

impl MigrateError {
    /// Build an IO error carrying the offending path.
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        MigrateError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// True when the error means the ledger and the scripts have diverged.
    pub fn is_divergence(&self) -> bool {
        matches!(
            self,
            MigrateError::FilesystemMissing { .. } | MigrateError::LedgerMismatch { .. }
        )
    }
}

/// Failures reported by a [`Ledger`](crate::ledger::Ledger) implementation.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// L001: Ledger table could not be created
    #[error("[L001] Ledger bootstrap failed: {0}")]
    Bootstrap(String),

    /// L002: Reading the ledger failed
    #[error("[L002] Ledger query failed: {0}")]
    Query(String),

    /// L003: The migration script itself failed
    #[error("[L003] Migration script failed: {0}")]
    Script(String),

    /// L004: Inserting or deleting the ledger row failed
    #[error("[L004] Ledger row update failed: {0}")]
    Record(String),

    /// L005: BEGIN/COMMIT/ROLLBACK failed
    #[error("[L005] Transaction failed: {0}")]
    Transaction(String),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Result type alias for LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;
