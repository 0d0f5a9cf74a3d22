//! Windowing and pagination
//!
//! A window is the `[from, to)` slice of an ordered match list currently
//! materialized to the caller. The corpus is immutable and the engine holds
//! no state between calls, so re-requesting the same window always returns
//! identical results.

use crate::error::QueryError;

/// Pagination state for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    /// Full in-scope match count, independent of the window
    pub total_count: usize,
    /// Requested page size
    pub limit: usize,
    /// Start of the slice, capped at `total_count`
    pub from: usize,
    /// End of the slice (exclusive); `to - from <= limit`
    pub to: usize,
}

impl QueryWindow {
    /// Reject window parameters before any scanning happens.
    pub(crate) fn validate(from: usize, limit: usize) -> Result<(), QueryError> {
        if limit == 0 {
            return Err(QueryError::InvalidWindow { from, limit });
        }
        Ok(())
    }

    /// Window for a completed search. A `from` past the end of the match
    /// list is not an error; it yields an empty slice with the count intact.
    pub(crate) fn of(total_count: usize, from: usize, limit: usize) -> Self {
        let from = from.min(total_count);
        let to = from.saturating_add(limit).min(total_count);
        Self {
            total_count,
            limit,
            from,
            to,
        }
    }

    /// The next page: `from` advances by `limit`, capped at the end.
    pub fn next(&self) -> Self {
        Self::of(
            self.total_count,
            self.from.saturating_add(self.limit),
            self.limit,
        )
    }

    /// The same `from` with a larger page.
    pub fn expand(&self, new_limit: usize) -> Result<Self, QueryError> {
        Self::validate(self.from, new_limit)?;
        Ok(Self::of(self.total_count, self.from, new_limit))
    }

    /// True once the window has moved past the last match.
    pub fn is_exhausted(&self) -> bool {
        self.from >= self.total_count
    }

    /// Number of matches materialized by this window
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
