//! DuckDB ledger implementation
//!
//! [`DuckDbLedger`] owns a DuckDB [`Connection`] and records applied
//! migrations in a two-column table (`version`, `name`).

use crate::error::{DbError, DbResult};
use crate::params::Placeholders;
use duckdb::Connection;
use std::path::Path;
use sw_core::config::DEFAULT_LEDGER_TABLE;
use sw_core::{
    Direction, Ledger, LedgerConfig, LedgerEntry, LedgerError, LedgerResult, ParamStyle,
    StepRequest,
};

/// Ledger stored in a DuckDB database.
///
/// Single-threaded: steps run one at a time, so no `Mutex` around the
/// connection.
pub struct DuckDbLedger {
    conn: Connection,
    table: String,
    schema: Option<String>,
    param_style: ParamStyle,
}

impl DuckDbLedger {
    /// Create a new in-memory DuckDB ledger
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::with_connection(conn))
    }

    /// Open (or create) a DuckDB database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self::with_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Wrap an existing connection using the default table settings
    pub fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            table: DEFAULT_LEDGER_TABLE.to_string(),
            schema: None,
            param_style: ParamStyle::default(),
        }
    }

    /// Open `path` and apply the table settings from `config`
    pub fn from_config(path: &str, config: &LedgerConfig) -> DbResult<Self> {
        let ledger = Self::new(path)?
            .with_table(&config.table)?
            .with_schema(config.schema.as_deref())?;
        Ok(ledger.with_param_style(config.param_style))
    }

    /// Use a different ledger table name
    pub fn with_table(mut self, table: &str) -> DbResult<Self> {
        validate_table_name(table)?;
        self.table = table.to_string();
        Ok(self)
    }

    /// Place the ledger table in `schema` (or the default schema for `None`)
    pub fn with_schema(mut self, schema: Option<&str>) -> DbResult<Self> {
        if let Some(schema) = schema {
            validate_schema_name(schema)?;
        }
        self.schema = schema.map(str::to_string);
        Ok(self)
    }

    /// Placeholder syntax for ledger statements
    pub fn with_param_style(mut self, style: ParamStyle) -> Self {
        self.param_style = style;
        self
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// `"table"` or `schema."table"`
    pub fn qualified_table(&self) -> String {
        qualified_table_name(self.schema.as_deref(), &self.table)
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    fn transaction<F, T>(&self, body: F) -> LedgerResult<T>
    where
        F: FnOnce(&Connection) -> LedgerResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| LedgerError::Transaction(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(LedgerError::Transaction(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                    log::warn!("ROLLBACK failed: {rollback_err}");
                }
            }
        }
        result
    }

    /// Run the script and update the ledger row on `conn`.
    fn run_step(&self, conn: &Connection, request: &StepRequest<'_>) -> LedgerResult<()> {
        if request.script.trim().is_empty() {
            log::debug!("Migration {} has an empty script", request.version);
        } else {
            conn.execute_batch(request.script)
                .map_err(|e| LedgerError::Script(e.to_string()))?;
        }

        let mut params = Placeholders::new(self.param_style);
        let version = i64::from(request.version);
        match request.direction {
            Direction::Up => {
                let sql = format!(
                    "INSERT INTO {} (version, name) VALUES ({}, {})",
                    self.qualified_table(),
                    params.next_placeholder(),
                    params.next_placeholder()
                );
                conn.execute(&sql, duckdb::params![version, request.name])
                    .map_err(|e| LedgerError::Record(format!("insert failed: {e}")))?;
            }
            Direction::Down => {
                let sql = format!(
                    "DELETE FROM {} WHERE version = {} AND name = {}",
                    self.qualified_table(),
                    params.next_placeholder(),
                    params.next_placeholder()
                );
                let deleted = conn
                    .execute(&sql, duckdb::params![version, request.name])
                    .map_err(|e| LedgerError::Record(format!("delete failed: {e}")))?;
                if deleted != 1 {
                    return Err(LedgerError::Record(format!(
                        "expected to remove 1 row for migration {} ({}), removed {}",
                        request.version, request.name, deleted
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Ledger for DuckDbLedger {
    fn ensure_ledger(&self) -> LedgerResult<()> {
        let mut sql = String::new();
        if let Some(schema) = &self.schema {
            sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {schema};\n"));
        }
        sql.push_str(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                 version INTEGER PRIMARY KEY NOT NULL,
                 name    TEXT NOT NULL
             );",
            self.qualified_table()
        ));
        self.conn
            .execute_batch(&sql)
            .map_err(|e| LedgerError::Bootstrap(format!("{}: {e}", self.qualified_table())))
    }

    fn applied(&self) -> LedgerResult<Vec<LedgerEntry>> {
        let sql = format!(
            "SELECT version, name FROM {} ORDER BY version ASC",
            self.qualified_table()
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| LedgerError::Query(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i32>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| LedgerError::Query(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            let (version, name) = row.map_err(|e| LedgerError::Query(e.to_string()))?;
            entries.push(LedgerEntry::new(to_version(version)?, name));
        }
        Ok(entries)
    }

    fn current_version(&self) -> LedgerResult<u32> {
        let sql = format!(
            "SELECT COALESCE(MAX(version), 0) FROM {}",
            self.qualified_table()
        );
        let version: i32 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| LedgerError::Query(format!("failed to read version: {e}")))?;
        to_version(version)
    }

    fn apply_step(&self, request: &StepRequest<'_>) -> LedgerResult<()> {
        if request.use_transaction {
            self.transaction(|conn| self.run_step(conn, request))
        } else {
            self.run_step(&self.conn, request)
        }
    }
}

fn to_version(raw: i32) -> LedgerResult<u32> {
    u32::try_from(raw)
        .map_err(|_| LedgerError::Query(format!("ledger holds invalid version {raw}")))
}

/// Render the ledger table reference; the table name is always quoted.
pub fn qualified_table_name(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(schema) => format!("{schema}.\"{table}\""),
        None => format!("\"{table}\""),
    }
}

fn validate_table_name(table: &str) -> DbResult<()> {
    let reason = if table.is_empty() {
        Some("must not be empty")
    } else if table.contains('"') {
        Some("must not contain double quotes")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(DbError::InvalidIdentifier {
            identifier: table.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Schemas are emitted unquoted, so only plain identifiers are accepted.
fn validate_schema_name(schema: &str) -> DbResult<()> {
    let mut chars = schema.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidIdentifier {
            identifier: schema.to_string(),
            reason: "schema must be a plain identifier ([A-Za-z_][A-Za-z0-9_]*)".to_string(),
        })
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
