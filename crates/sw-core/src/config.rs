//! Configuration types and parsing for stepwise.yml

use crate::error::{MigrateError, MigrateResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names looked up in a project directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["stepwise.yml", "stepwise.yaml"];

/// Main project configuration from stepwise.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the migration scripts, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Ledger table settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Run steps inside transactions unless a script opts out
    #[serde(default = "default_true")]
    pub transactions: bool,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Where and how applied migrations are recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Ledger table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Optional schema; the table becomes schema."table"
    #[serde(default)]
    pub schema: Option<String>,

    /// Placeholder style for ledger statements
    #[serde(default)]
    pub param_style: ParamStyle,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            schema: None,
            param_style: ParamStyle::default(),
        }
    }
}

/// Bind parameter syntax of the target database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParamStyle {
    /// `?`
    #[default]
    QuestionMark,
    /// `$1`, `$2`, ...
    DollarSign,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: DatabaseConfig::default(),
            ledger: LedgerConfig::default(),
            transactions: true,
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

/// Default ledger table name
pub const DEFAULT_LEDGER_TABLE: &str = "migration_version";

fn default_table() -> String {
    DEFAULT_LEDGER_TABLE.to_string()
}

/// Project-relative DuckDB file holding the ledger
pub const DEFAULT_DB_PATH: &str = "stepwise.duckdb";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> MigrateResult<Self> {
        if !path.exists() {
            return Err(MigrateError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MigrateError::io(path, e))?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for stepwise.yml or stepwise.yaml.
    pub fn load_from_dir(dir: &Path) -> MigrateResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(MigrateError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Like [`load_from_dir`](Self::load_from_dir) but falls back to defaults
    /// when no config file exists.
    pub fn load_from_dir_or_default(dir: &Path) -> MigrateResult<Self> {
        match Self::load_from_dir(dir) {
            Err(MigrateError::ConfigNotFound { path }) => {
                log::debug!("No config at {}, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> MigrateResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(MigrateError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }
        if self.ledger.table.trim().is_empty() {
            return Err(MigrateError::ConfigInvalid {
                message: "ledger.table cannot be empty".to_string(),
            });
        }
        if matches!(&self.ledger.schema, Some(s) if s.trim().is_empty()) {
            return Err(MigrateError::ConfigInvalid {
                message: "ledger.schema cannot be empty when set".to_string(),
            });
        }
        Ok(())
    }

    /// Migrations directory resolved against `root`
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
