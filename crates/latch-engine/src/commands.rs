//! Command handlers: manual lock/unlock, configuration, log reads, and the
//! analytics passthroughs used by the gateway.

use latch_core::responses::{
    DailyActivity, HourlyActivity, ThreatEntry, TotalCounts, UnlockedSpan,
};
use latch_core::{DoorStatus, LockAction, LockConfig, LogEntry};
use serde::Deserialize;

use crate::error::EngineError;
use crate::service::LockService;

fn default_delay() -> i64 {
    30
}

fn default_lock_time() -> String {
    "22:00".to_string()
}

fn default_unlock_time() -> String {
    "06:00".to_string()
}

/// Body of `PUT /config`. Missing fields fall back to the factory defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default = "default_delay")]
    pub auto_lock_delay: i64,
    #[serde(default)]
    pub schedule_enabled: bool,
    #[serde(default = "default_lock_time")]
    pub schedule_lock_time: String,
    #[serde(default = "default_unlock_time")]
    pub schedule_unlock_time: String,
}

impl LockService {
    /// Lock the door. Unconditional and idempotent: an already-locked door
    /// still gets a `lock (manual)` entry and a fresh `last_access`. Does
    /// NOT run the evaluation first.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn lock(&self) -> Result<DoorStatus, EngineError> {
        let _guard = self.transitions.lock().await;
        let status = self
            .db()
            .apply_transition(LockAction::LockManual, self.now())
            .await?;
        Ok(status)
    }

    /// Unlock the door if `pin` matches the configured secret.
    ///
    /// Same idempotence as [`Self::lock`]. A wrong PIN appends exactly one
    /// `unlock (fail)` entry, leaves the status untouched, and returns
    /// [`EngineError::InvalidPin`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPin` on PIN mismatch, or
    /// `EngineError::Store` on store failure.
    pub async fn unlock(&self, pin: &str) -> Result<DoorStatus, EngineError> {
        let _guard = self.transitions.lock().await;

        if !self.pin_matches(pin) {
            tracing::warn!("unlock rejected: invalid PIN");
            self.db()
                .append_log(LockAction::UnlockFail, false, self.now())
                .await?;
            return Err(EngineError::InvalidPin);
        }

        let status = self
            .db()
            .apply_transition(LockAction::UnlockManual, self.now())
            .await?;
        Ok(status)
    }

    /// Read the lock configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn config(&self) -> Result<LockConfig, EngineError> {
        Ok(self.db().lock_config().await?)
    }

    /// Replace the lock configuration, stamping `updated_at`.
    ///
    /// The delay must be non-negative; schedule time strings are stored
    /// verbatim, without format validation.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` for a negative delay, or
    /// `EngineError::Store` on store failure.
    pub async fn update_config(&self, update: ConfigUpdate) -> Result<LockConfig, EngineError> {
        if update.auto_lock_delay < 0 {
            return Err(EngineError::Validation(format!(
                "auto_lock_delay must be a non-negative integer, got {}",
                update.auto_lock_delay
            )));
        }

        let _guard = self.transitions.lock().await;
        let config = LockConfig {
            auto_lock_delay: update.auto_lock_delay,
            schedule_enabled: update.schedule_enabled,
            schedule_lock_time: update.schedule_lock_time,
            schedule_unlock_time: update.schedule_unlock_time,
            updated_at: self.now(),
        };
        self.db().set_lock_config(&config).await?;
        tracing::info!(
            auto_lock_delay = config.auto_lock_delay,
            schedule_enabled = config.schedule_enabled,
            "lock configuration updated"
        );
        Ok(config)
    }

    /// Newest page of the activity log (page size from service config).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn recent_logs(&self) -> Result<Vec<LogEntry>, EngineError> {
        Ok(self.db().recent_logs(self.log_page_size()).await?)
    }

    // -- analytics passthroughs ---------------------------------------------

    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn activity_by_hour(&self) -> Result<Vec<HourlyActivity>, EngineError> {
        Ok(self.db().activity_by_hour().await?)
    }

    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn daily_activity(&self) -> Result<Vec<DailyActivity>, EngineError> {
        Ok(self.db().daily_activity().await?)
    }

    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn unlocked_durations(&self) -> Result<Vec<UnlockedSpan>, EngineError> {
        Ok(self.db().unlocked_durations().await?)
    }

    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn threats(&self) -> Result<Vec<ThreatEntry>, EngineError> {
        Ok(self.db().threats().await?)
    }

    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn total_counts(&self) -> Result<TotalCounts, EngineError> {
        Ok(self.db().total_counts().await?)
    }
}
