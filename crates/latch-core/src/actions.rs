//! Audit action vocabulary.
//!
//! Every state transition (and every rejected unlock attempt) is recorded in
//! the activity log under one of six actions. The stored and wire strings keep
//! the legacy `"lock (auto)"` vocabulary so existing databases and dashboard
//! clients stay compatible, but all in-process classification goes through
//! [`LockAction::kind`] and [`LockAction::cause`] — never string matching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an action moved the door toward locked or unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Lock,
    Unlock,
}

/// What triggered an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCause {
    /// Direct lock/unlock command.
    Manual,
    /// Idle-timeout relock applied by the engine.
    Auto,
    /// Daily schedule transition applied by the engine.
    Schedule,
    /// Rejected unlock attempt (wrong PIN). Never mutates the door.
    Fail,
}

/// A logged door action.
///
/// The serde representation is the legacy log vocabulary, which is also the
/// form stored in the `logs.action` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockAction {
    #[serde(rename = "lock (manual)")]
    LockManual,
    #[serde(rename = "lock (auto)")]
    LockAuto,
    #[serde(rename = "lock (schedule)")]
    LockSchedule,
    #[serde(rename = "unlock (manual)")]
    UnlockManual,
    #[serde(rename = "unlock (schedule)")]
    UnlockSchedule,
    #[serde(rename = "unlock (fail)")]
    UnlockFail,
}

impl LockAction {
    /// All actions, in stable order. Used to build SQL `IN` lists for
    /// kind-based classification in analytics queries.
    pub const ALL: [Self; 6] = [
        Self::LockManual,
        Self::LockAuto,
        Self::LockSchedule,
        Self::UnlockManual,
        Self::UnlockSchedule,
        Self::UnlockFail,
    ];

    /// Return the string stored in SQL and sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LockManual => "lock (manual)",
            Self::LockAuto => "lock (auto)",
            Self::LockSchedule => "lock (schedule)",
            Self::UnlockManual => "unlock (manual)",
            Self::UnlockSchedule => "unlock (schedule)",
            Self::UnlockFail => "unlock (fail)",
        }
    }

    /// Parse a stored action string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }

    #[must_use]
    pub const fn kind(self) -> ActionKind {
        match self {
            Self::LockManual | Self::LockAuto | Self::LockSchedule => ActionKind::Lock,
            Self::UnlockManual | Self::UnlockSchedule | Self::UnlockFail => ActionKind::Unlock,
        }
    }

    #[must_use]
    pub const fn cause(self) -> ActionCause {
        match self {
            Self::LockManual | Self::UnlockManual => ActionCause::Manual,
            Self::LockAuto => ActionCause::Auto,
            Self::LockSchedule | Self::UnlockSchedule => ActionCause::Schedule,
            Self::UnlockFail => ActionCause::Fail,
        }
    }

    /// Whether this action represents a successful transition.
    ///
    /// Only `unlock (fail)` is recorded with `success = false`.
    #[must_use]
    pub const fn is_transition(self) -> bool {
        !matches!(self, Self::UnlockFail)
    }

    /// Successful actions of the given kind. Analytics filter the log with
    /// these rather than matching on string prefixes.
    #[must_use]
    pub fn transitions_of_kind(kind: ActionKind) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|a| a.is_transition() && a.kind() == kind)
            .collect()
    }
}

impl fmt::Display for LockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stored_strings_roundtrip() {
        for action in LockAction::ALL {
            assert_eq!(LockAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(LockAction::parse("lock"), None);
    }

    #[test]
    fn serde_uses_legacy_vocabulary() {
        let json = serde_json::to_string(&LockAction::LockAuto).unwrap();
        assert_eq!(json, "\"lock (auto)\"");
        let back: LockAction = serde_json::from_str("\"unlock (fail)\"").unwrap();
        assert_eq!(back, LockAction::UnlockFail);
    }

    #[test]
    fn classification() {
        assert_eq!(LockAction::LockAuto.kind(), ActionKind::Lock);
        assert_eq!(LockAction::LockAuto.cause(), ActionCause::Auto);
        assert_eq!(LockAction::UnlockFail.kind(), ActionKind::Unlock);
        assert_eq!(LockAction::UnlockFail.cause(), ActionCause::Fail);
        assert!(!LockAction::UnlockFail.is_transition());
    }

    #[test]
    fn kind_filters_exclude_failures() {
        let unlocks = LockAction::transitions_of_kind(ActionKind::Unlock);
        assert_eq!(
            unlocks,
            vec![LockAction::UnlockManual, LockAction::UnlockSchedule]
        );
        let locks = LockAction::transitions_of_kind(ActionKind::Lock);
        assert_eq!(locks.len(), 3);
    }
}
