//! Error types for sw-db

use thiserror::Error;

/// Database setup errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Ledger table or schema name cannot be used (D002)
    #[error("[D002] Invalid ledger identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
