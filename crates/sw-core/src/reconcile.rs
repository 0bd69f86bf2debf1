//! Cross-check of the ledger against the validated migration set.

use crate::error::{MigrateError, MigrateResult};
use crate::migration::LedgerEntry;
use crate::validator::MigrationSet;

/// Verify every ledger row has a script with the same name.
///
/// Versions present on disk but absent from the ledger are pending, not an
/// error.
pub fn reconcile(set: &MigrationSet, ledger: &[LedgerEntry]) -> MigrateResult<()> {
    for entry in ledger {
        let Some(migration) = set.get(entry.version) else {
            return Err(MigrateError::FilesystemMissing {
                version: entry.version,
            });
        };

        if migration.name != entry.name {
            return Err(MigrateError::LedgerMismatch {
                version: entry.version,
                ledger_name: entry.name.clone(),
                filesystem_name: migration.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
