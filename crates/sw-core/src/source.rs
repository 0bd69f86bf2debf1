//! Migration source capability and its two implementations.
//!
//! [`DirSource`] reads (and creates) scripts in a directory on disk.
//! [`StaticSource`] serves a fixed set of scripts from memory, e.g. ones
//! embedded with `include_str!`.

use crate::error::{MigrateError, MigrateResult};
use crate::migration::{canonical_filename, Direction};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read access to migration scripts
pub trait MigrationSource {
    /// Names of all non-directory entries, in no particular order
    fn list_entries(&self) -> MigrateResult<Vec<String>>;

    /// Full text of one script
    fn read_script(&self, filename: &str) -> MigrateResult<String>;
}

/// Sources that can also scaffold new scripts
pub trait WritableMigrationSource: MigrationSource {
    /// Make sure the containing location exists
    fn ensure_location(&self) -> MigrateResult<()>;

    /// Create an empty script and return where it was written
    fn create_script(&self, version: u32, name: &str, direction: Direction)
        -> MigrateResult<PathBuf>;
}

/// Scripts stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this source reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MigrationSource for DirSource {
    fn list_entries(&self) -> MigrateResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "Migration directory {} does not exist yet",
                    self.dir.display()
                );
                return Ok(Vec::new());
            }
            Err(e) if self.dir.is_file() => {
                log::debug!("Cannot list {}: {}", self.dir.display(), e);
                return Err(MigrateError::BadSourcePath {
                    path: self.dir.display().to_string(),
                });
            }
            Err(e) => return Err(MigrateError::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MigrateError::io(&self.dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| MigrateError::io(entry.path(), e))?;
            if file_type.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => log::warn!("Skipping non UTF-8 entry {:?}", raw),
            }
        }
        Ok(names)
    }

    fn read_script(&self, filename: &str) -> MigrateResult<String> {
        let path = self.dir.join(filename);
        fs::read_to_string(&path).map_err(|e| MigrateError::io(&path, e))
    }
}

impl WritableMigrationSource for DirSource {
    fn ensure_location(&self) -> MigrateResult<()> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(MigrateError::BadSourcePath {
                path: self.dir.display().to_string(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&self.dir).map_err(|e| MigrateError::io(&self.dir, e))
            }
            Err(e) => Err(MigrateError::io(&self.dir, e)),
        }
    }

    fn create_script(
        &self,
        version: u32,
        name: &str,
        direction: Direction,
    ) -> MigrateResult<PathBuf> {
        let path = self.dir.join(canonical_filename(version, name, direction));
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| MigrateError::io(&path, e))?;
        Ok(path)
    }
}

/// Read-only scripts held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    scripts: Vec<(String, String)>,
}

impl StaticSource {
    /// Build from `(filename, body)` pairs
    pub fn new<I, N, B>(scripts: I) -> Self
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<String>,
    {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(n, b)| (n.into(), b.into()))
                .collect(),
        }
    }
}

impl MigrationSource for StaticSource {
    fn list_entries(&self) -> MigrateResult<Vec<String>> {
        Ok(self.scripts.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_script(&self, filename: &str) -> MigrateResult<String> {
        self.scripts
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| {
                MigrateError::io(
                    filename,
                    std::io::Error::new(ErrorKind::NotFound, "no such embedded script"),
                )
            })
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
