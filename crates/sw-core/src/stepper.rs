//! Version stepper.
//!
//! [`Migrator`] drives the ledger from its current version to a target by a
//! chain of single-version transitions, all in one direction. Every
//! reconciliation check runs before the first step; once stepping starts,
//! the first failing step ends the call and earlier steps stay committed.

use crate::error::{MigrateError, MigrateResult, DEFAULT_FILENAME_PATTERN};
use crate::ledger::{Ledger, StepRequest};
use crate::migration::{uses_transaction, Direction, Step};
use crate::parser::parse_filenames;
use crate::reconcile::reconcile;
use crate::source::{MigrationSource, WritableMigrationSource};
use crate::validator::MigrationSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One committed transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStep {
    pub version: u32,
    pub name: String,
    pub direction: Direction,
}

/// Outcome of a successful `migrate_to` / `migrate_latest`
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Ledger version before stepping
    pub from: u32,
    /// Ledger version after stepping
    pub to: u32,
    /// Steps in the order they were committed
    pub applied: Vec<AppliedStep>,
    pub elapsed: Duration,
}

impl MigrationReport {
    /// True when nothing had to be applied or reverted
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Paths written by [`Migrator::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub version: u32,
    pub up: PathBuf,
    pub down: PathBuf,
}

/// Compute the steps that take the ledger from `current` to `target`.
///
/// Down scripts are not checked here; a missing one fails when its step
/// is reached.
pub fn plan(current: u32, target: i64, set: &MigrationSet) -> MigrateResult<Vec<Step>> {
    if target == i64::from(current) {
        return Ok(Vec::new());
    }
    if target < 0 {
        return Err(MigrateError::BadTarget {
            version: target,
            problem: "version must be 0 or higher".to_string(),
        });
    }
    let latest = set.latest_version();
    if target > i64::from(latest) {
        return Err(MigrateError::BadTarget {
            version: target,
            problem: format!("max version is {latest}"),
        });
    }

    let target = target as u32;
    let (direction, versions): (Direction, Vec<u32>) = if target > current {
        (Direction::Up, (current + 1..=target).collect())
    } else {
        (Direction::Down, (target + 1..=current).rev().collect())
    };

    versions
        .into_iter()
        .map(|version| {
            set.get(version)
                .cloned()
                .map(|descriptor| Step {
                    descriptor,
                    direction,
                })
                .ok_or(MigrateError::FilesystemMissing { version })
        })
        .collect()
}

/// Reconciles scripts with the ledger and steps between versions.
pub struct Migrator<L, S> {
    ledger: L,
    source: S,
    transactions: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl<L: Ledger, S: MigrationSource> Migrator<L, S> {
    /// Create a migrator with transactions enabled and no cancellation flag
    pub fn new(ledger: L, source: S) -> Self {
        Self {
            ledger,
            source,
            transactions: true,
            cancel: None,
        }
    }

    /// Globally enable or disable transactional steps
    pub fn with_transactions(mut self, enabled: bool) -> Self {
        self.transactions = enabled;
        self
    }

    /// Flag checked before every step; setting it stops the run
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Parse, validate, and reconcile the migration set.
    pub fn migrations(&self) -> MigrateResult<MigrationSet> {
        self.ledger.ensure_ledger()?;

        let entries = self.source.list_entries()?;
        let catalog = parse_filenames(&entries)?;
        let set = MigrationSet::validate(catalog)?;

        let applied = self.ledger.applied()?;
        reconcile(&set, &applied)?;

        log::debug!(
            "{} migrations known, {} applied",
            set.len(),
            applied.len()
        );
        Ok(set)
    }

    /// Highest applied version, read fresh from the ledger
    pub fn current_version(&self) -> MigrateResult<u32> {
        self.ledger.ensure_ledger()?;
        Ok(self.ledger.current_version()?)
    }

    /// Whether the ledger is behind the latest known version
    pub fn has_pending(&self) -> MigrateResult<bool> {
        let set = self.migrations()?;
        let current = self.ledger.current_version()?;
        Ok(current != set.latest_version())
    }

    /// Step to the highest known version
    pub fn migrate_latest(&self) -> MigrateResult<MigrationReport> {
        let set = self.migrations()?;
        self.step_to(&set, i64::from(set.latest_version()))
    }

    /// Step to `target`, applying or reverting one version at a time
    pub fn migrate_to(&self, target: i64) -> MigrateResult<MigrationReport> {
        let set = self.migrations()?;
        self.step_to(&set, target)
    }

    fn step_to(&self, set: &MigrationSet, target: i64) -> MigrateResult<MigrationReport> {
        let from = self.ledger.current_version()?;
        log::info!("Migrating from {} to {}", from, target);

        let start = Instant::now();
        let steps = plan(from, target, set)?;

        let mut current = from;
        let mut applied = Vec::with_capacity(steps.len());
        for step in &steps {
            if self.is_cancelled() {
                log::warn!("Migration cancelled at version {}", current);
                return Err(MigrateError::Cancelled { version: current });
            }

            self.apply(step)?;
            current = step.resulting_version();
            applied.push(AppliedStep {
                version: step.descriptor.version,
                name: step.descriptor.name.clone(),
                direction: step.direction,
            });
        }

        let elapsed = start.elapsed();
        log::info!("Finished in {:?}", elapsed);
        Ok(MigrationReport {
            from,
            to: current,
            applied,
            elapsed,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn apply(&self, step: &Step) -> MigrateResult<()> {
        let migration = &step.descriptor;
        let direction = step.direction;
        if !migration.has(direction) {
            return Err(MigrateError::MissingMigration {
                version: migration.version,
                direction,
            });
        }

        let filename = migration.filename(direction);
        log::info!(" {} {}", direction.marker(), filename);

        let script = self
            .source
            .read_script(&filename)
            .map_err(|source| MigrateError::ScriptRead {
                version: migration.version,
                direction,
                source: Box::new(source),
            })?;
        let use_transaction = uses_transaction(&script, self.transactions);
        if !use_transaction {
            log::debug!("Running {} outside a transaction", filename);
        }

        self.ledger
            .apply_step(&StepRequest {
                version: migration.version,
                name: &migration.name,
                direction,
                script: &script,
                use_transaction,
            })
            .map_err(|source| MigrateError::Step {
                version: migration.version,
                direction,
                source,
            })
    }
}

impl<L: Ledger, S: WritableMigrationSource> Migrator<L, S> {
    /// Scaffold an empty up/down script pair as the next version.
    pub fn create(&self, name: &str) -> MigrateResult<Scaffold> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(MigrateError::BadFilename {
                filename: name.to_string(),
                expected: DEFAULT_FILENAME_PATTERN.to_string(),
            });
        }

        let set = self.migrations()?;
        let version = set.latest_version() + 1;
        if version == 1 {
            self.source.ensure_location()?;
        }

        let up = self.source.create_script(version, name, Direction::Up)?;
        log::info!(" Created {}", up.display());
        let down = self.source.create_script(version, name, Direction::Down)?;
        log::info!(" Created {}", down.display());

        Ok(Scaffold { version, up, down })
    }
}

#[cfg(test)]
#[path = "stepper_test.rs"]
mod tests;
