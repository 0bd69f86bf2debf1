//! Ledger capability trait.
//!
//! A ledger persists which migrations have been applied and executes one
//! step at a time. Any database binding can implement it; `sw-db` provides
//! the DuckDB one.

use crate::error::LedgerResult;
use crate::migration::{Direction, LedgerEntry};

/// Everything a ledger needs to apply or revert one migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRequest<'a> {
    pub version: u32,
    pub name: &'a str,
    pub direction: Direction,
    /// Full script body
    pub script: &'a str,
    /// Wrap the script and the ledger row change in one transaction
    pub use_transaction: bool,
}

/// Persisted record of applied migrations.
pub trait Ledger {
    /// Create the ledger table if it does not exist (idempotent)
    fn ensure_ledger(&self) -> LedgerResult<()>;

    /// All applied rows, ascending by version
    fn applied(&self) -> LedgerResult<Vec<LedgerEntry>>;

    /// Highest applied version, or 0 if none
    fn current_version(&self) -> LedgerResult<u32>;

    /// Run the script, then insert (up) or delete (down) the ledger row.
    ///
    /// When `request.use_transaction` is set both happen in one transaction
    /// that is rolled back if either fails.
    fn apply_step(&self, request: &StepRequest<'_>) -> LedgerResult<()>;
}

impl<L: Ledger + ?Sized> Ledger for Box<L> {
    fn ensure_ledger(&self) -> LedgerResult<()> {
        (**self).ensure_ledger()
    }

    fn applied(&self) -> LedgerResult<Vec<LedgerEntry>> {
        (**self).applied()
    }

    fn current_version(&self) -> LedgerResult<u32> {
        (**self).current_version()
    }

    fn apply_step(&self, request: &StepRequest<'_>) -> LedgerResult<()> {
        (**self).apply_step(request)
    }
}
