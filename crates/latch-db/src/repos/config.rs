//! Lock configuration repository.

use latch_core::LockConfig;

use crate::LatchDb;
use crate::error::StoreError;
use crate::helpers::{get_bool, parse_datetime};

impl LatchDb {
    /// Read the lock configuration singleton.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoResult` if the row is missing, or `StoreError`
    /// on query failure.
    pub async fn lock_config(&self) -> Result<LockConfig, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT auto_lock_delay, schedule_enabled, schedule_lock_time,
                        schedule_unlock_time, updated_at
                 FROM config WHERE id = 1",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(LockConfig {
            auto_lock_delay: row.get::<i64>(0)?,
            schedule_enabled: get_bool(&row, 1)?,
            schedule_lock_time: row.get::<String>(2)?,
            schedule_unlock_time: row.get::<String>(3)?,
            updated_at: parse_datetime(&row.get::<String>(4)?)?,
        })
    }

    /// Replace the lock configuration singleton.
    ///
    /// The caller stamps `updated_at`; time strings are stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the update fails.
    pub async fn set_lock_config(&self, config: &LockConfig) -> Result<(), StoreError> {
        self.conn()
            .execute(
                "UPDATE config
                 SET auto_lock_delay = ?1,
                     schedule_enabled = ?2,
                     schedule_lock_time = ?3,
                     schedule_unlock_time = ?4,
                     updated_at = ?5
                 WHERE id = 1",
                libsql::params![
                    config.auto_lock_delay,
                    i64::from(config.schedule_enabled),
                    config.schedule_lock_time.as_str(),
                    config.schedule_unlock_time.as_str(),
                    config.updated_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }
}
