//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use sw_core::{Config, DirSource, LedgerConfig, MigrateResult, Migrator};
use sw_db::DuckDbLedger;

use crate::cli::GlobalArgs;

/// Migrator type every command works with
pub(crate) type CliMigrator = Migrator<DuckDbLedger, DirSource>;

/// Settings resolved from the config file and command-line overrides
#[derive(Debug, Clone)]
pub(crate) struct RuntimeContext {
    /// Absolute or project-relative migrations directory
    pub migrations_dir: PathBuf,

    /// DuckDB path or `:memory:`
    pub database: String,

    /// Ledger table settings
    pub ledger: LedgerConfig,

    /// Global transaction switch
    pub transactions: bool,

    /// Set by ctrl-c; checked by the migrator between steps
    pub cancel: Arc<AtomicBool>,
}

impl RuntimeContext {
    /// Load config and apply global overrides
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let project_path = Path::new(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir_or_default(project_path)
                .context("Failed to load project configuration")?
        };

        Ok(Self::resolve(config, args))
    }

    fn resolve(config: Config, args: &GlobalArgs) -> Self {
        let project_path = Path::new(&args.project_dir);

        let migrations_dir = match &args.migrations_dir {
            Some(dir) => PathBuf::from(dir),
            None => config.migrations_dir_absolute(project_path),
        };

        let database = match &args.database {
            Some(db) => db.clone(),
            None => resolve_db_path(project_path, &config.database.path),
        };

        Self {
            migrations_dir,
            database,
            ledger: config.ledger,
            transactions: config.transactions && !args.no_transactions,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Open the ledger and build a migrator wired to the cancel flag
    pub fn migrator(&self) -> Result<CliMigrator> {
        let ledger = DuckDbLedger::from_config(&self.database, &self.ledger)
            .with_context(|| format!("Failed to open database '{}'", self.database))?;
        log::debug!(
            "Using ledger {} in {} with migrations from {}",
            ledger.qualified_table(),
            self.database,
            self.migrations_dir.display()
        );
        Ok(Migrator::new(ledger, DirSource::new(&self.migrations_dir))
            .with_transactions(self.transactions)
            .with_cancel_flag(Arc::clone(&self.cancel)))
    }

    /// Set the cancel flag on ctrl-c
    pub fn cancel_on_interrupt(&self) {
        let flag = Arc::clone(&self.cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupt received, stopping after the current step");
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    /// Build a migrator and run `op` on a blocking thread.
    ///
    /// DuckDB calls block, so they stay off the async worker threads.
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&CliMigrator) -> MigrateResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let ctx = self.clone();
        tokio::task::spawn_blocking(move || -> Result<T> {
            let migrator = ctx.migrator()?;
            Ok(op(&migrator)?)
        })
        .await
        .context("Migration task panicked")?
    }
}

/// Resolve a configured database path against the project directory.
fn resolve_db_path(project_path: &Path, path: &str) -> String {
    if path == ":memory:" || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        project_path.join(path).display().to_string()
    }
}
