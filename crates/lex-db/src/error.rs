//! Database error types for lex-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    ///
    /// Also returned for rows owned by another user.
    #[error("No result returned")]
    NoResult,

    /// A uniqueness constraint rejected the write (e.g., duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced row does not exist or is not visible to the caller.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Invalid state encountered (e.g., bad data in DB, forbidden transition).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Detect a SQLite UNIQUE constraint violation.
pub(crate) fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}
