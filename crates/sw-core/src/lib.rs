//! sw-core - Core library for Stepwise
//!
//! Reconciles versioned SQL migration scripts with the ledger of applied
//! migrations and steps a database between versions. Database access and
//! script storage are behind the [`Ledger`] and [`MigrationSource`] traits.

pub mod config;
pub mod error;
pub mod ledger;
pub mod migration;
pub mod parser;
pub mod reconcile;
pub mod source;
pub mod stepper;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{Config, LedgerConfig, ParamStyle};
pub use error::{LedgerError, LedgerResult, MigrateError, MigrateResult};
pub use ledger::{Ledger, StepRequest};
pub use migration::{
    canonical_filename, Direction, LedgerEntry, MigrationDescriptor, Step,
    NO_TRANSACTION_SENTINEL,
};
pub use parser::{parse_filenames, MigrationCatalog};
pub use reconcile::reconcile;
pub use source::{DirSource, MigrationSource, StaticSource, WritableMigrationSource};
pub use stepper::{plan, AppliedStep, MigrationReport, Migrator, Scaffold};
pub use validator::MigrationSet;
