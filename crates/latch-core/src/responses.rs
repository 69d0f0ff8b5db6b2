//! JSON response types returned by the HTTP gateway.
//!
//! The field names and shapes are the service's compatibility surface.
//! Deployed dashboard clients depend on them, so changes here are wire-format
//! changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::LockAction;
use crate::entities::{LockConfig, LogEntry};

/// Response for `POST /door/lock`, `POST /door/unlock`, and `PUT /config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
}

impl CommandResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Response for `GET /config` — the lock configuration minus `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigResponse {
    pub auto_lock_delay: i64,
    pub schedule_enabled: bool,
    pub schedule_lock_time: String,
    pub schedule_unlock_time: String,
}

impl From<LockConfig> for ConfigResponse {
    fn from(config: LockConfig) -> Self {
        Self {
            auto_lock_delay: config.auto_lock_delay,
            schedule_enabled: config.schedule_enabled,
            schedule_lock_time: config.schedule_lock_time,
            schedule_unlock_time: config.schedule_unlock_time,
        }
    }
}

/// One element of the `GET /logs` array. The internal row id is not exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntryResponse {
    pub action: LockAction,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

impl From<LogEntry> for LogEntryResponse {
    fn from(entry: LogEntry) -> Self {
        Self {
            action: entry.action,
            timestamp: entry.timestamp,
            success: entry.success,
        }
    }
}

// ---------------------------------------------------------------------------
// Analytics views
// ---------------------------------------------------------------------------

/// Successful lock/unlock counts for one hour of the day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyActivity {
    pub hour: u32,
    pub locks: i64,
    pub unlocks: i64,
}

/// Successful event count for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyActivity {
    pub event_date: String,
    pub total_events: i64,
}

/// One unlock paired with the next successful lock, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnlockedSpan {
    pub unlocked_at: DateTime<Utc>,
    pub locked_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<f64>,
}

/// One failed entry from the threat view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreatEntry {
    pub timestamp: DateTime<Utc>,
    pub action: LockAction,
}

/// Lifetime totals of successful locks and unlocks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TotalCounts {
    pub total_locks: i64,
    pub total_unlocks: i64,
}
