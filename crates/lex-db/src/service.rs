//! Service layer orchestrating database mutations with the audit trail.
//!
//! `LexService` wraps `LexDb` (raw database access). All repo methods are
//! implemented as `impl LexService` blocks in [`crate::repos`].

use crate::LexDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with audit entries.
///
/// Every mutation method follows this protocol:
/// 1. Check ownership of every referenced row
/// 2. Execute SQL
/// 3. Append an audit entry
pub struct LexService {
    db: LexDb,
}

impl LexService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = LexDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `LexDb`.
    #[must_use]
    pub const fn from_db(db: LexDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LexDb {
        &self.db
    }
}
