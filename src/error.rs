//! Error Types
//!
//! Every fallible helper in the crate returns `UtilResult<T>`.

use thiserror::Error;

/// Common result type for utility operations
pub type UtilResult<T> = Result<T, UtilError>;

/// Utility-level errors
#[derive(Debug, Error)]
pub enum UtilError {
    /// A list row could not be located by structural equality
    #[error("Not found: {0}")]
    NotFound(String),
    /// Input that cannot be represented (bad timestamp, unserializable value)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Stored JSON could not be parsed or produced
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The cookie store is unavailable or refused a write
    #[error("Storage error: {0}")]
    Storage(String),
}
