//! Migration set validation.
//!
//! Turns a sparse [`MigrationCatalog`] into a dense [`MigrationSet`] once
//! every version from 1 to the catalog size is proven to have an up script.

use crate::error::{MigrateError, MigrateResult};
use crate::migration::{Direction, MigrationDescriptor};
use crate::parser::MigrationCatalog;

/// Contiguous, ordered migrations: index `k` holds version `k + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSet {
    migrations: Vec<MigrationDescriptor>,
}

impl MigrationSet {
    /// Validate a catalog and project it onto a dense sequence.
    ///
    /// Missing down scripts are allowed here; they only fail when a revert
    /// needs them.
    pub fn validate(catalog: MigrationCatalog) -> MigrateResult<Self> {
        let count = catalog.len();
        for index in 0..count {
            let version = index as u32 + 1;
            match catalog.get(version) {
                Some(m) if m.has_up => {}
                _ => {
                    return Err(MigrateError::MissingMigration {
                        version,
                        direction: Direction::Up,
                    })
                }
            }
        }

        // Keys are exactly 1..=count at this point, so map order is version order.
        let migrations: Vec<MigrationDescriptor> = catalog.into_map().into_values().collect();
        debug_assert!(migrations
            .iter()
            .enumerate()
            .all(|(i, m)| m.version as usize == i + 1));
        Ok(Self { migrations })
    }

    /// Highest known version (0 when empty)
    pub fn latest_version(&self) -> u32 {
        self.migrations.len() as u32
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Look up a version (1-based)
    pub fn get(&self, version: u32) -> Option<&MigrationDescriptor> {
        if version == 0 {
            return None;
        }
        self.migrations.get(version as usize - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MigrationDescriptor> {
        self.migrations.iter()
    }

    pub fn as_slice(&self) -> &[MigrationDescriptor] {
        &self.migrations
    }
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
