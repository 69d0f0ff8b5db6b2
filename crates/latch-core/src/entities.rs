//! Entity structs for the persisted singletons and the activity log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::LockAction;

/// The door's persisted state. Singleton row.
///
/// `last_access` records the instant of the most recent state transition,
/// not the most recent read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoorStatus {
    pub locked: bool,
    pub last_access: DateTime<Utc>,
}

/// Lock behavior configuration. Singleton row.
///
/// `auto_lock_delay` is in seconds; 0 disables the idle relock. Schedule
/// times are `"HH:MM"` strings compared against the wall clock truncated to
/// the minute — they are stored verbatim, without format validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockConfig {
    pub auto_lock_delay: i64,
    pub schedule_enabled: bool,
    pub schedule_lock_time: String,
    pub schedule_unlock_time: String,
    pub updated_at: DateTime<Utc>,
}

impl LockConfig {
    /// Factory default: 30 s auto-lock, schedule disabled, 22:00/06:00.
    #[must_use]
    pub fn factory_default(now: DateTime<Utc>) -> Self {
        Self {
            auto_lock_delay: 30,
            schedule_enabled: false,
            schedule_lock_time: "22:00".to_string(),
            schedule_unlock_time: "06:00".to_string(),
            updated_at: now,
        }
    }
}

/// One row of the append-only activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub action: LockAction,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}
