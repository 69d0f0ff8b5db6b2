//! Activity log repository. Append-only: no update or delete paths exist.

use chrono::{DateTime, Utc};
use latch_core::{LockAction, LogEntry};

use crate::LatchDb;
use crate::error::StoreError;
use crate::helpers::{get_bool, parse_action, parse_datetime};

impl LatchDb {
    /// Append a log entry WITHOUT touching the door status.
    ///
    /// Used for rejected unlock attempts; applied transitions append their
    /// entry inside [`LatchDb::apply_transition`] instead.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails.
    pub async fn append_log(
        &self,
        action: LockAction,
        success: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.conn()
            .execute(
                "INSERT INTO logs (action, timestamp, success) VALUES (?1, ?2, ?3)",
                libsql::params![
                    action.as_str(),
                    timestamp.to_rfc3339(),
                    i64::from(success)
                ],
            )
            .await?;
        Ok(())
    }

    /// Newest `limit` log entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn recent_logs(&self, limit: u32) -> Result<Vec<LogEntry>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, action, timestamp, success FROM logs
                 ORDER BY timestamp DESC, id DESC LIMIT ?1",
                libsql::params![i64::from(limit)],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(LogEntry {
                id: row.get::<i64>(0)?,
                action: parse_action(&row.get::<String>(1)?)?,
                timestamp: parse_datetime(&row.get::<String>(2)?)?,
                success: get_bool(&row, 3)?,
            });
        }
        Ok(entries)
    }
}
