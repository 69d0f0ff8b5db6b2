//! Store integration tests:
//! - migrations: idempotent open, singleton seeding, additive schedule upgrade
//! - transition primitive: paired status write + log append
//! - log reads: ordering and limit
//! - analytics: kind-based classification

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use latch_core::{LockAction, LockConfig};
use latch_db::LatchDb;

async fn test_db() -> LatchDb {
    LatchDb::open_local(":memory:").await.unwrap()
}

// ---------------------------------------------------------------------------
// Migrations & seeding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_seeds_locked_door_and_factory_config() {
    let db = test_db().await;

    let status = db.door_status().await.unwrap();
    assert!(status.locked);

    let config = db.lock_config().await.unwrap();
    assert_eq!(config.auto_lock_delay, 30);
    assert!(!config.schedule_enabled);
    assert_eq!(config.schedule_lock_time, "22:00");
    assert_eq!(config.schedule_unlock_time, "06:00");
}

#[tokio::test]
async fn reopen_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latchd.db");
    let path = path.to_str().unwrap();

    {
        let db = LatchDb::open_local(path).await.unwrap();
        let now = Utc::now();
        db.apply_transition(LockAction::UnlockManual, now).await.unwrap();
    }

    // Second open re-runs migrations; state must survive untouched.
    let db = LatchDb::open_local(path).await.unwrap();
    let status = db.door_status().await.unwrap();
    assert!(!status.locked);
    assert_eq!(db.recent_logs(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn pre_schedule_database_upgrades_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.db");
    let path = path.to_str().unwrap();

    // A deployment from before the schedule feature: config has only the
    // auto-lock column, and holds a non-default value.
    {
        let db = libsql::Builder::new_local(path).build().await.unwrap();
        let conn = db.connect().unwrap();
        conn.execute_batch(
            "CREATE TABLE config (
                 id INTEGER PRIMARY KEY CHECK (id = 1),
                 auto_lock_delay INTEGER NOT NULL DEFAULT 30,
                 updated_at TEXT NOT NULL
             );
             INSERT INTO config (id, auto_lock_delay, updated_at)
             VALUES (1, 45, '2025-01-01 00:00:00');",
        )
        .await
        .unwrap();
    }

    let db = LatchDb::open_local(path).await.unwrap();
    let config = db.lock_config().await.unwrap();

    // Existing data preserved, schedule columns arrive disabled with defaults.
    assert_eq!(config.auto_lock_delay, 45);
    assert!(!config.schedule_enabled);
    assert_eq!(config.schedule_lock_time, "22:00");
    assert_eq!(config.schedule_unlock_time, "06:00");
}

// ---------------------------------------------------------------------------
// Transition primitive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transition_pairs_status_write_with_log_append() {
    let db = test_db().await;
    let now = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();

    let status = db.apply_transition(LockAction::UnlockManual, now).await.unwrap();
    assert!(!status.locked);
    assert_eq!(status.last_access, now);

    let persisted = db.door_status().await.unwrap();
    assert_eq!(persisted, status);

    let logs = db.recent_logs(10).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, LockAction::UnlockManual);
    assert!(logs[0].success);
    assert_eq!(logs[0].timestamp, now);
}

#[tokio::test]
async fn failed_attempt_append_leaves_status_untouched() {
    let db = test_db().await;
    let before = db.door_status().await.unwrap();

    db.append_log(LockAction::UnlockFail, false, Utc::now())
        .await
        .unwrap();

    assert_eq!(db.door_status().await.unwrap(), before);
    let logs = db.recent_logs(10).await.unwrap();
    assert_eq!(logs[0].action, LockAction::UnlockFail);
    assert!(!logs[0].success);
}

#[tokio::test]
async fn recent_logs_newest_first_with_limit() {
    let db = test_db().await;
    let base = Utc.with_ymd_and_hms(2026, 8, 8, 9, 0, 0).unwrap();

    for i in 0..5 {
        let action = if i % 2 == 0 {
            LockAction::LockManual
        } else {
            LockAction::UnlockManual
        };
        db.apply_transition(action, base + Duration::seconds(i))
            .await
            .unwrap();
    }

    let logs = db.recent_logs(3).await.unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].timestamp, base + Duration::seconds(4));
    assert_eq!(logs[2].timestamp, base + Duration::seconds(2));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[tokio::test]
async fn config_roundtrip_stores_times_verbatim() {
    let db = test_db().await;
    let now = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();

    // Malformed times are accepted as given, not validated.
    let config = LockConfig {
        auto_lock_delay: 0,
        schedule_enabled: true,
        schedule_lock_time: "25:99".to_string(),
        schedule_unlock_time: "whenever".to_string(),
        updated_at: now,
    };
    db.set_lock_config(&config).await.unwrap();

    assert_eq!(db.lock_config().await.unwrap(), config);
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analytics_classify_by_kind_not_prefix() {
    let db = test_db().await;
    let at = |h: u32| Utc.with_ymd_and_hms(2026, 8, 8, h, 15, 0).unwrap();

    db.apply_transition(LockAction::UnlockManual, at(8)).await.unwrap();
    db.apply_transition(LockAction::LockAuto, at(8)).await.unwrap();
    db.apply_transition(LockAction::UnlockSchedule, at(9)).await.unwrap();
    db.apply_transition(LockAction::LockSchedule, at(22)).await.unwrap();
    // Failed attempt: must not count toward any activity view.
    db.append_log(LockAction::UnlockFail, false, at(8)).await.unwrap();

    let hourly = db.activity_by_hour().await.unwrap();
    assert_eq!(hourly.len(), 24);
    assert_eq!(hourly[8].locks, 1);
    assert_eq!(hourly[8].unlocks, 1);
    assert_eq!(hourly[9].unlocks, 1);
    assert_eq!(hourly[22].locks, 1);
    assert_eq!(hourly[0].locks + hourly[0].unlocks, 0);

    let totals = db.total_counts().await.unwrap();
    assert_eq!(totals.total_locks, 2);
    assert_eq!(totals.total_unlocks, 2);

    let threats = db.threats().await.unwrap();
    assert_eq!(threats.len(), 1);
    assert_eq!(threats[0].action, LockAction::UnlockFail);
}

#[tokio::test]
async fn daily_activity_counts_successful_events() {
    let db = test_db().await;
    let day1 = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2026, 8, 8, 10, 0, 0).unwrap();

    db.apply_transition(LockAction::UnlockManual, day1).await.unwrap();
    db.apply_transition(LockAction::LockManual, day1 + Duration::minutes(5))
        .await
        .unwrap();
    db.apply_transition(LockAction::UnlockManual, day2).await.unwrap();
    db.append_log(LockAction::UnlockFail, false, day2).await.unwrap();

    let days = db.daily_activity().await.unwrap();
    assert_eq!(days.len(), 2);
    // Newest first.
    assert_eq!(days[0].event_date, "2026-08-08");
    assert_eq!(days[0].total_events, 1);
    assert_eq!(days[1].event_date, "2026-08-07");
    assert_eq!(days[1].total_events, 2);
}

#[tokio::test]
async fn unlocked_durations_pair_with_next_lock() {
    let db = test_db().await;
    let t0 = Utc.with_ymd_and_hms(2026, 8, 8, 10, 0, 0).unwrap();

    db.apply_transition(LockAction::UnlockManual, t0).await.unwrap();
    db.apply_transition(LockAction::LockAuto, t0 + Duration::seconds(90))
        .await
        .unwrap();
    // Second unlock still open.
    db.apply_transition(LockAction::UnlockManual, t0 + Duration::minutes(10))
        .await
        .unwrap();

    let spans = db.unlocked_durations().await.unwrap();
    assert_eq!(spans.len(), 2);

    // Newest unlock first: still open.
    assert_eq!(spans[0].unlocked_at, t0 + Duration::minutes(10));
    assert_eq!(spans[0].locked_at, None);
    assert_eq!(spans[0].duration_minutes, None);

    // Older unlock closed after 90 s = 1.5 minutes.
    assert_eq!(spans[1].unlocked_at, t0);
    assert_eq!(spans[1].locked_at, Some(t0 + Duration::seconds(90)));
    assert_eq!(spans[1].duration_minutes, Some(1.5));
}
