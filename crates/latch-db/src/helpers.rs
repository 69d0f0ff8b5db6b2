//! Row-to-entity parsing helpers.
//!
//! Repos convert `libsql::Row` (column-indexed) into typed structs. These
//! helpers isolate the parsing logic and handle the dual datetime format
//! issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};
use latch_core::LockAction;

use crate::error::StoreError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-08-08T14:30:00+00:00"`) and `SQLite`'s
/// default format (`"2026-08-08 14:30:00"`).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either
/// format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a stored action string into a [`LockAction`].
///
/// # Errors
///
/// Returns `StoreError::Query` if the string is outside the action
/// vocabulary — that would mean a foreign writer touched the log.
pub fn parse_action(s: &str) -> Result<LockAction, StoreError> {
    LockAction::parse(s).ok_or_else(|| StoreError::Query(format!("Unknown log action '{s}'")))
}

/// Read an INTEGER column as bool. `SQLite` has no boolean affinity; both
/// singletons and the log store 0/1.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, StoreError> {
    Ok(row.get::<i64>(idx)? != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn datetime_parses_both_formats() {
        let rfc = parse_datetime("2026-08-08T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-08-08 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
    }

    #[test]
    fn datetime_rejects_garbage() {
        assert!(parse_datetime("not a time").is_err());
    }

    #[test]
    fn action_rejects_foreign_strings() {
        assert!(parse_action("lock (manual)").is_ok());
        assert!(parse_action("lock").is_err());
    }
}
