//! Filename parser: raw directory entries to a sparse version -> descriptor map.
//!
//! Recognized entries look like `0001_create_users.up.sql` or
//! `0001_create_users.down.sql`. Anything without one of the two suffixes
//! is skipped. The map produced here is not yet checked for gaps; see
//! [`crate::validator`].

use crate::error::{MigrateError, MigrateResult, DEFAULT_FILENAME_PATTERN};
use crate::migration::{canonical_filename, Direction, MigrationDescriptor, DOWN_SUFFIX, UP_SUFFIX};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Separator between the version token and the name token
const SEPARATOR: char = '_';

/// Sparse association of version number to descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationCatalog {
    by_version: BTreeMap<u32, MigrationDescriptor>,
}

impl MigrationCatalog {
    /// Number of distinct versions seen
    pub fn len(&self) -> usize {
        self.by_version.len()
    }

    /// True when no migration entries were recognized
    pub fn is_empty(&self) -> bool {
        self.by_version.is_empty()
    }

    /// Look up a version
    pub fn get(&self, version: u32) -> Option<&MigrationDescriptor> {
        self.by_version.get(&version)
    }

    /// Consume the catalog, yielding the underlying map
    pub(crate) fn into_map(self) -> BTreeMap<u32, MigrationDescriptor> {
        self.by_version
    }

    /// Record one parsed entry.
    fn insert(&mut self, version: u32, name: &str, direction: Direction) -> MigrateResult<()> {
        match self.by_version.entry(version) {
            Entry::Vacant(slot) => {
                let mut descriptor = MigrationDescriptor {
                    version,
                    name: name.to_string(),
                    has_up: false,
                    has_down: false,
                };
                descriptor.mark(direction);
                slot.insert(descriptor);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.name != name {
                    // Slots follow direction, not arrival order.
                    let (up_name, down_name) = match direction {
                        Direction::Up => (name.to_string(), existing.name.clone()),
                        Direction::Down => (existing.name.clone(), name.to_string()),
                    };
                    return Err(MigrateError::NameMismatch {
                        version,
                        up_name,
                        down_name,
                    });
                }
                if existing.has(direction) {
                    log::debug!("Duplicate {} script for migration {}", direction, version);
                }
                existing.mark(direction);
            }
        }
        Ok(())
    }
}

/// Split a recognized entry into its direction and the part before the suffix.
fn strip_direction(entry: &str) -> Option<(Direction, &str)> {
    if let Some(stem) = entry.strip_suffix(UP_SUFFIX) {
        Some((Direction::Up, stem))
    } else {
        entry
            .strip_suffix(DOWN_SUFFIX)
            .map(|stem| (Direction::Down, stem))
    }
}

/// Parse a single entry.
///
/// Returns `Ok(None)` for entries that are not migration scripts.
pub fn parse_filename(entry: &str) -> MigrateResult<Option<(u32, String, Direction)>> {
    let Some((direction, stem)) = strip_direction(entry) else {
        return Ok(None);
    };

    let bad = |expected: String| MigrateError::BadFilename {
        filename: entry.to_string(),
        expected,
    };

    let Some((version_token, name)) = stem.split_once(SEPARATOR) else {
        return Err(bad(DEFAULT_FILENAME_PATTERN.to_string()));
    };

    if version_token.is_empty() || !version_token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad(DEFAULT_FILENAME_PATTERN.to_string()));
    }
    let version: u32 = version_token
        .parse()
        .map_err(|_| bad(DEFAULT_FILENAME_PATTERN.to_string()))?;

    let canonical = canonical_filename(version, name, direction);
    if canonical != entry {
        return Err(bad(canonical));
    }

    Ok(Some((version, name.to_string(), direction)))
}

/// Parse an unordered listing into a [`MigrationCatalog`].
pub fn parse_filenames<I, S>(entries: I) -> MigrateResult<MigrationCatalog>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut catalog = MigrationCatalog::default();
    for entry in entries {
        let entry = entry.as_ref();
        match parse_filename(entry)? {
            Some((version, name, direction)) => catalog.insert(version, &name, direction)?,
            None => log::debug!("Ignoring non-migration entry '{}'", entry),
        }
    }
    Ok(catalog)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
