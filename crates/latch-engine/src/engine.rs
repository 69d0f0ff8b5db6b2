//! The lock state engine: on-demand evaluation of auto-lock and schedule.

use chrono::Duration;
use latch_core::{DoorStatus, LockAction};

use crate::error::EngineError;
use crate::service::LockService;

impl LockService {
    /// Current door status, evaluated.
    ///
    /// This is a command with side effects, not a pure query: the evaluation
    /// may apply an auto-lock or schedule transition (persisted and logged)
    /// before the status is returned.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Store` on store failure.
    pub async fn status(&self) -> Result<DoorStatus, EngineError> {
        let _guard = self.transitions.lock().await;
        self.evaluate().await
    }

    /// One evaluation pass. Caller must hold the transition mutex.
    ///
    /// Rules, in fixed order:
    /// 1. Auto-lock: an unlocked door idle strictly longer than the
    ///    configured delay relocks (`lock (auto)`). Delay 0 disables.
    /// 2. Schedule: at the exact configured minute, lock if unlocked, ELSE
    ///    unlock if locked — one branch per evaluation. A minute in which no
    ///    request arrives is silently missed; checks are lazy by design,
    ///    there is no timer.
    pub(crate) async fn evaluate(&self) -> Result<DoorStatus, EngineError> {
        let mut status = self.db().door_status().await?;
        let config = self.db().lock_config().await?;
        let now = self.now();

        if !status.locked && config.auto_lock_delay > 0 {
            let idle = now - status.last_access;
            if idle > Duration::seconds(config.auto_lock_delay) {
                tracing::debug!(idle_secs = idle.num_seconds(), "idle timeout exceeded");
                status = self.db().apply_transition(LockAction::LockAuto, now).await?;
            }
        }

        if config.schedule_enabled {
            let minute = now.format("%H:%M").to_string();
            if minute == config.schedule_lock_time && !status.locked {
                status = self
                    .db()
                    .apply_transition(LockAction::LockSchedule, now)
                    .await?;
            } else if minute == config.schedule_unlock_time && status.locked {
                status = self
                    .db()
                    .apply_transition(LockAction::UnlockSchedule, now)
                    .await?;
            }
        }

        Ok(status)
    }
}
