//! Door status repository, including the transition primitive.

use chrono::{DateTime, Utc};
use latch_core::{ActionKind, DoorStatus, LockAction};

use crate::LatchDb;
use crate::error::StoreError;
use crate::helpers::{get_bool, parse_datetime};

impl LatchDb {
    /// Read the door status singleton.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoResult` if the row is missing (store never
    /// initialized), or `StoreError` on query failure.
    pub async fn door_status(&self) -> Result<DoorStatus, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT locked, last_access FROM door_status WHERE id = 1",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(DoorStatus {
            locked: get_bool(&row, 0)?,
            last_access: parse_datetime(&row.get::<String>(1)?)?,
        })
    }

    /// Apply a lock or unlock transition: persist the new status and append
    /// the matching log entry in ONE transaction.
    ///
    /// Either both writes commit or neither does — an evaluation can never
    /// leave a logged transition without its status update (or vice versa).
    /// The target state is derived from the action's kind, so a transition
    /// and its audit entry cannot disagree.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `action` is a transition (`unlock (fail)` entries
    /// go through [`LatchDb::append_log`] and must not touch the status).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the transaction cannot be committed.
    pub async fn apply_transition(
        &self,
        action: LockAction,
        now: DateTime<Utc>,
    ) -> Result<DoorStatus, StoreError> {
        debug_assert!(action.is_transition());
        let locked = action.kind() == ActionKind::Lock;

        let tx = self.conn().transaction().await?;
        tx.execute(
            "UPDATE door_status SET locked = ?1, last_access = ?2 WHERE id = 1",
            libsql::params![i64::from(locked), now.to_rfc3339()],
        )
        .await?;
        tx.execute(
            "INSERT INTO logs (action, timestamp, success) VALUES (?1, ?2, 1)",
            libsql::params![action.as_str(), now.to_rfc3339()],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(action = %action, locked, "door transition applied");

        Ok(DoorStatus {
            locked,
            last_access: now,
        })
    }
}
