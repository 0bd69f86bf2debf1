//! Shared test utilities for sw-core

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{Ledger, StepRequest};
use crate::migration::{Direction, LedgerEntry};
use crate::source::StaticSource;
use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One call to [`Ledger::apply_step`] as seen by [`MemoryLedger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedStep {
    pub version: u32,
    pub name: String,
    pub direction: Direction,
    pub use_transaction: bool,
}

/// Ledger kept in memory that records every step it is asked to apply.
#[derive(Debug, Default)]
pub(crate) struct MemoryLedger {
    rows: RefCell<Vec<LedgerEntry>>,
    steps: RefCell<Vec<RecordedStep>>,
    fail_on: Option<(u32, Direction)>,
    cancel_after: Option<(u32, Arc<AtomicBool>)>,
    bootstraps: Cell<usize>,
}

impl MemoryLedger {
    /// Ledger with versions `1..=names.len()` already applied
    pub(crate) fn with_applied(names: &[&str]) -> Self {
        let rows = names
            .iter()
            .enumerate()
            .map(|(i, name)| LedgerEntry::new(i as u32 + 1, *name))
            .collect();
        Self {
            rows: RefCell::new(rows),
            ..Self::default()
        }
    }

    /// Make the step for `version`/`direction` fail with a script error
    pub(crate) fn failing_on(mut self, version: u32, direction: Direction) -> Self {
        self.fail_on = Some((version, direction));
        self
    }

    /// Raise `flag` once the step for `version` has been recorded
    pub(crate) fn cancelling_after(mut self, version: u32, flag: Arc<AtomicBool>) -> Self {
        self.cancel_after = Some((version, flag));
        self
    }

    pub(crate) fn steps(&self) -> Vec<RecordedStep> {
        self.steps.borrow().clone()
    }

    pub(crate) fn step_versions(&self) -> Vec<(u32, Direction)> {
        self.steps
            .borrow()
            .iter()
            .map(|s| (s.version, s.direction))
            .collect()
    }

    pub(crate) fn rows(&self) -> Vec<LedgerEntry> {
        self.rows.borrow().clone()
    }

    pub(crate) fn bootstraps(&self) -> usize {
        self.bootstraps.get()
    }
}

impl Ledger for MemoryLedger {
    fn ensure_ledger(&self) -> LedgerResult<()> {
        self.bootstraps.set(self.bootstraps.get() + 1);
        Ok(())
    }

    fn applied(&self) -> LedgerResult<Vec<LedgerEntry>> {
        let mut rows = self.rows.borrow().clone();
        rows.sort_by_key(|r| r.version);
        Ok(rows)
    }

    fn current_version(&self) -> LedgerResult<u32> {
        Ok(self.rows.borrow().iter().map(|r| r.version).max().unwrap_or(0))
    }

    fn apply_step(&self, request: &StepRequest<'_>) -> LedgerResult<()> {
        if self.fail_on == Some((request.version, request.direction)) {
            return Err(LedgerError::Script(format!(
                "injected failure for version {}",
                request.version
            )));
        }

        self.steps.borrow_mut().push(RecordedStep {
            version: request.version,
            name: request.name.to_string(),
            direction: request.direction,
            use_transaction: request.use_transaction,
        });

        let mut rows = self.rows.borrow_mut();
        match request.direction {
            Direction::Up => rows.push(LedgerEntry::new(request.version, request.name)),
            Direction::Down => {
                rows.retain(|r| !(r.version == request.version && r.name == request.name))
            }
        }

        if let Some((version, flag)) = &self.cancel_after {
            if *version == request.version {
                flag.store(true, Ordering::SeqCst);
            }
        }
        Ok(())
    }
}

/// Up and down scripts for versions `1..=count` named `v1`, `v2`, ...
pub(crate) fn numbered_source(count: u32) -> StaticSource {
    StaticSource::new((1..=count).flat_map(|v| {
        [
            (
                format!("{v:04}_v{v}.up.sql"),
                format!("CREATE TABLE t{v} (id INTEGER);"),
            ),
            (format!("{v:04}_v{v}.down.sql"), format!("DROP TABLE t{v};")),
        ]
    }))
}
