//! Engine error types.

use latch_db::error::StoreError;
use thiserror::Error;

/// Errors from engine commands.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unlock attempted with a PIN that does not match the configured
    /// secret. Already recorded in the activity log when raised.
    #[error("Invalid PIN")]
    InvalidPin,

    /// Malformed configuration input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store failure (connection, query, or transaction).
    #[error(transparent)]
    Store(#[from] StoreError),
}
