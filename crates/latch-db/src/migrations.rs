//! Database migration runner.
//!
//! Embeds the base schema at compile time and executes it on every open
//! (all statements use `IF NOT EXISTS`). The schedule columns are newer than
//! the base schema and are applied as an in-place additive upgrade driven by
//! `pragma_table_info`, so a database created before the schedule feature
//! gains the columns without losing its rows. Finally the singleton rows are
//! seeded with `INSERT OR IGNORE` (door locked, factory config).

use chrono::Utc;
use latch_core::LockConfig;

use crate::LatchDb;
use crate::error::StoreError;

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Columns added to `config` after the initial schema shipped, with their
/// column definitions. Order matters: ALTER TABLE appends one at a time.
const SCHEDULE_COLUMNS: [(&str, &str); 3] = [
    ("schedule_enabled", "INTEGER NOT NULL DEFAULT 0"),
    ("schedule_lock_time", "TEXT NOT NULL DEFAULT '22:00'"),
    ("schedule_unlock_time", "TEXT NOT NULL DEFAULT '06:00'"),
];

impl LatchDb {
    /// Run all migrations and seed the singleton rows.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Migration(format!("001_initial: {e}")))?;
        self.upgrade_schedule_columns().await?;
        self.seed_singletons().await?;
        Ok(())
    }

    /// Add any missing schedule columns to an existing `config` table.
    async fn upgrade_schedule_columns(&self) -> Result<(), StoreError> {
        let mut rows = self
            .conn
            .query("SELECT name FROM pragma_table_info('config')", ())
            .await
            .map_err(|e| StoreError::Migration(format!("table_info(config): {e}")))?;

        let mut existing = Vec::new();
        while let Some(row) = rows.next().await? {
            existing.push(row.get::<String>(0)?);
        }

        for (name, definition) in SCHEDULE_COLUMNS {
            if existing.iter().any(|c| c == name) {
                continue;
            }
            tracing::info!(column = name, "adding schedule column to config table");
            self.conn
                .execute(&format!("ALTER TABLE config ADD COLUMN {name} {definition}"), ())
                .await
                .map_err(|e| StoreError::Migration(format!("add column {name}: {e}")))?;
        }

        Ok(())
    }

    /// Insert the default singleton rows if they do not exist yet.
    ///
    /// The door starts locked; the config starts at factory defaults.
    async fn seed_singletons(&self) -> Result<(), StoreError> {
        let now = Utc::now();
        let defaults = LockConfig::factory_default(now);

        self.conn
            .execute(
                "INSERT OR IGNORE INTO door_status (id, locked, last_access) VALUES (1, 1, ?1)",
                libsql::params![now.to_rfc3339()],
            )
            .await?;

        self.conn
            .execute(
                "INSERT OR IGNORE INTO config
                 (id, auto_lock_delay, schedule_enabled, schedule_lock_time, schedule_unlock_time, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    defaults.auto_lock_delay,
                    i64::from(defaults.schedule_enabled),
                    defaults.schedule_lock_time.as_str(),
                    defaults.schedule_unlock_time.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(())
    }
}
