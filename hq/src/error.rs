//! Query engine error types
//!
//! Every variant stems from caller input or explicit cancellation; nothing
//! here is transient, so there are no retries anywhere in the engine.

use historystore::StoreError;
use thiserror::Error;

/// Errors surfaced by query compilation and search execution
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid window: from={from}, limit={limit} (limit must be > 0)")]
    InvalidWindow { from: usize, limit: usize },

    #[error("Search cancelled after scanning {scanned_turns} turns")]
    Cancelled { scanned_turns: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}
