//! Migration descriptors, ledger rows, and step types.

use serde::Serialize;
use std::fmt;

/// First line that makes a script run outside a transaction.
///
/// Needed for statements some engines refuse inside a transaction block,
/// e.g. PostgreSQL `CREATE INDEX CONCURRENTLY`.
pub const NO_TRANSACTION_SENTINEL: &str = "-- migrate: no-transaction\n";

/// Suffix of up scripts
pub const UP_SUFFIX: &str = ".up.sql";

/// Suffix of down scripts
pub const DOWN_SUFFIX: &str = ".down.sql";

/// Direction of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply: version -> version + 1
    Up,
    /// Revert: version -> version - 1
    Down,
}

impl Direction {
    /// `"up"` or `"down"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Filename suffix for scripts of this direction
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::Up => UP_SUFFIX,
            Direction::Down => DOWN_SUFFIX,
        }
    }

    /// `+` for up, `-` for down (used in step logs)
    pub fn marker(&self) -> char {
        match self {
            Direction::Up => '+',
            Direction::Down => '-',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical schema change, assembled from its up and down scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDescriptor {
    /// Version number, dense from 1 in a validated set
    pub version: u32,
    /// Name token shared by the up and down scripts
    pub name: String,
    /// Whether an up script exists
    pub has_up: bool,
    /// Whether a down script exists
    pub has_down: bool,
}

impl MigrationDescriptor {
    /// Whether a script exists for `direction`
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.has_up,
            Direction::Down => self.has_down,
        }
    }

    /// Canonical filename of the script for `direction`
    pub fn filename(&self, direction: Direction) -> String {
        canonical_filename(self.version, &self.name, direction)
    }

    pub(crate) fn mark(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.has_up = true,
            Direction::Down => self.has_down = true,
        }
    }
}

/// Render `<version>_<name>.<direction>.sql` with the version padded to 4 digits.
pub fn canonical_filename(version: u32, name: &str, direction: Direction) -> String {
    format!("{:04}_{}.{}.sql", version, name, direction)
}

/// A row the ledger reports as applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub version: u32,
    pub name: String,
}

impl LedgerEntry {
    pub fn new(version: u32, name: impl Into<String>) -> Self {
        Self {
            version,
            name: name.into(),
        }
    }
}

/// One planned transition of the stepper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Migration to apply or revert
    pub descriptor: MigrationDescriptor,
    /// Direction of the transition
    pub direction: Direction,
}

impl Step {
    /// Ledger version after this step commits
    pub fn resulting_version(&self) -> u32 {
        match self.direction {
            Direction::Up => self.descriptor.version,
            Direction::Down => self.descriptor.version - 1,
        }
    }
}

/// Decide whether `script` runs inside a transaction.
///
/// `transactions_enabled` is the global switch; the sentinel first line
/// opts a single script out.
pub fn uses_transaction(script: &str, transactions_enabled: bool) -> bool {
    transactions_enabled && !script.starts_with(NO_TRANSACTION_SENTINEL)
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
