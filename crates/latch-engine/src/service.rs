//! The lock service: store handle + clock + transition mutex.

use std::sync::Arc;

use latch_db::LatchDb;
use tokio::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::error::EngineError;

/// Orchestrates every door operation against the singleton state.
///
/// All read-check-write sequences (evaluation, manual commands, config
/// updates) run under `transitions`, so two concurrent evaluations cannot
/// both observe an overdue unlocked door and double-apply an auto-lock.
/// Store-level atomicity of each individual transition is the store's job
/// (`LatchDb::apply_transition`); the mutex serializes the decisions.
pub struct LockService {
    db: LatchDb,
    clock: Arc<dyn Clock>,
    pin: String,
    log_page_size: u32,
    pub(crate) transitions: Mutex<()>,
}

impl LockService {
    /// Build a service over an open store, using the wall clock.
    #[must_use]
    pub fn new(db: LatchDb, pin: impl Into<String>, log_page_size: u32) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
            pin: pin.into(),
            log_page_size,
            transitions: Mutex::new(()),
        }
    }

    /// Replace the clock (tests).
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) const fn db(&self) -> &LatchDb {
        &self.db
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub(crate) fn pin_matches(&self, candidate: &str) -> bool {
        self.pin == candidate
    }

    pub(crate) const fn log_page_size(&self) -> u32 {
        self.log_page_size
    }

    /// Store reachability probe backing `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Store` if the store is unreachable.
    pub async fn health(&self) -> Result<(), EngineError> {
        self.db.ping().await?;
        Ok(())
    }
}
