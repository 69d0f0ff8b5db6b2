//! Read-only aggregate views over the activity log.
//!
//! No behavioral contract beyond grouping the log by the stated dimension.
//! Lock-vs-unlock classification is driven by [`LockAction::kind`] through
//! generated `IN` lists — the queries never match on action string prefixes.

use latch_core::responses::{
    DailyActivity, HourlyActivity, ThreatEntry, TotalCounts, UnlockedSpan,
};
use latch_core::{ActionKind, LockAction};

use crate::LatchDb;
use crate::error::StoreError;
use crate::helpers::{parse_action, parse_datetime};

/// Build `"?1, ?2, …"` placeholders plus values for an action `IN` list.
fn action_params(actions: &[LockAction]) -> (String, Vec<libsql::Value>) {
    let placeholders = (1..=actions.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let values = actions
        .iter()
        .map(|a| libsql::Value::Text(a.as_str().to_string()))
        .collect();
    (placeholders, values)
}

impl LatchDb {
    /// Successful lock/unlock counts per hour of day (all 24 hours present).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn activity_by_hour(&self) -> Result<Vec<HourlyActivity>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT strftime('%H', timestamp) AS hour, action, COUNT(*) AS count
                 FROM logs WHERE success = 1
                 GROUP BY hour, action",
                (),
            )
            .await?;

        let mut locks = [0i64; 24];
        let mut unlocks = [0i64; 24];
        while let Some(row) = rows.next().await? {
            let hour: usize = row
                .get::<String>(0)?
                .parse()
                .map_err(|e| StoreError::Query(format!("bad hour bucket: {e}")))?;
            if hour >= 24 {
                return Err(StoreError::Query(format!("hour bucket out of range: {hour}")));
            }
            let action = parse_action(&row.get::<String>(1)?)?;
            let count = row.get::<i64>(2)?;
            match action.kind() {
                ActionKind::Lock => locks[hour] += count,
                ActionKind::Unlock => unlocks[hour] += count,
            }
        }

        Ok((0..24)
            .map(|hour| HourlyActivity {
                hour: hour as u32,
                locks: locks[hour],
                unlocks: unlocks[hour],
            })
            .collect())
    }

    /// Successful events per calendar day, newest 30 days.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn daily_activity(&self) -> Result<Vec<DailyActivity>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT date(timestamp) AS event_date, COUNT(*) AS total_events
                 FROM logs WHERE success = 1
                 GROUP BY event_date
                 ORDER BY event_date DESC LIMIT 30",
                (),
            )
            .await?;

        let mut days = Vec::new();
        while let Some(row) = rows.next().await? {
            days.push(DailyActivity {
                event_date: row.get::<String>(0)?,
                total_events: row.get::<i64>(1)?,
            });
        }
        Ok(days)
    }

    /// Newest 50 successful unlocks, each paired with the next successful
    /// lock (open spans have no lock side and no duration).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn unlocked_durations(&self) -> Result<Vec<UnlockedSpan>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT action, timestamp FROM logs WHERE success = 1
                 ORDER BY timestamp ASC, id ASC",
                (),
            )
            .await?;

        let mut unlock_times = Vec::new();
        let mut lock_times = Vec::new();
        while let Some(row) = rows.next().await? {
            let action = parse_action(&row.get::<String>(0)?)?;
            let ts = parse_datetime(&row.get::<String>(1)?)?;
            match action.kind() {
                ActionKind::Unlock => unlock_times.push(ts),
                ActionKind::Lock => lock_times.push(ts),
            }
        }

        // Newest 50 unlocks; lock_times is ascending, so the first lock
        // strictly after the unlock is found by partition point.
        let spans = unlock_times
            .iter()
            .rev()
            .take(50)
            .map(|&unlocked_at| {
                let next = lock_times.partition_point(|&t| t <= unlocked_at);
                let locked_at = lock_times.get(next).copied();
                let duration_minutes = locked_at.map(|lock| {
                    let minutes =
                        (lock - unlocked_at).num_milliseconds() as f64 / 60_000.0;
                    (minutes * 10.0).round() / 10.0
                });
                UnlockedSpan {
                    unlocked_at,
                    locked_at,
                    duration_minutes,
                }
            })
            .collect();

        Ok(spans)
    }

    /// Newest 50 failed entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn threats(&self) -> Result<Vec<ThreatEntry>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT timestamp, action FROM logs WHERE success = 0
                 ORDER BY timestamp DESC, id DESC LIMIT 50",
                (),
            )
            .await?;

        let mut threats = Vec::new();
        while let Some(row) = rows.next().await? {
            threats.push(ThreatEntry {
                timestamp: parse_datetime(&row.get::<String>(0)?)?,
                action: parse_action(&row.get::<String>(1)?)?,
            });
        }
        Ok(threats)
    }

    /// Lifetime totals of successful locks and unlocks.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a count query fails.
    pub async fn total_counts(&self) -> Result<TotalCounts, StoreError> {
        let total_locks = self
            .count_successful(&LockAction::transitions_of_kind(ActionKind::Lock))
            .await?;
        let total_unlocks = self
            .count_successful(&LockAction::transitions_of_kind(ActionKind::Unlock))
            .await?;
        Ok(TotalCounts {
            total_locks,
            total_unlocks,
        })
    }

    async fn count_successful(&self, actions: &[LockAction]) -> Result<i64, StoreError> {
        let (placeholders, values) = action_params(actions);
        let sql =
            format!("SELECT COUNT(*) FROM logs WHERE success = 1 AND action IN ({placeholders})");
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(values))
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
