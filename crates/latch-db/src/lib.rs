//! # latch-db
//!
//! libSQL persistence for latchd state and the activity log.
//!
//! Holds the two singleton rows (door status, lock configuration) and the
//! append-only `logs` table. Repositories are implemented as `impl LatchDb`
//! blocks in [`repos`]; the one write primitive with transition semantics is
//! [`LatchDb::apply_transition`], which commits the status update and the log
//! append in a single transaction.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

use error::StoreError;
use libsql::Builder;

/// Handle to the latchd database.
///
/// Opens run migrations automatically, so a handle is always backed by a
/// fully-initialized schema with both singleton rows present.
pub struct LatchDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LatchDb {
    /// Open a local database at the given path (`:memory:` for tests).
    ///
    /// Runs migrations and seeds the singleton rows on first open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let latch_db = Self { db, conn };
        latch_db.run_migrations().await?;
        Ok(latch_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Store reachability probe backing `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the probe query cannot be executed.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut rows = self.conn.query("SELECT 1", ()).await?;
        rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(())
    }
}
