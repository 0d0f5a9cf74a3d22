//! Id prefix resolution
//!
//! Any unambiguous leading substring of an id resolves to the full id.
//! Resolution is a binary-search range scan over a sorted id list; an exact
//! match always wins, even when the full id is itself a prefix of another.

use crate::error::StoreError;

/// Which namespace a resolved id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Session,
    Turn,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdKind::Session => write!(f, "session"),
            IdKind::Turn => write!(f, "turn"),
        }
    }
}

/// Sorted id list supporting prefix lookup
#[derive(Debug, Default)]
pub(crate) struct PrefixIndex {
    /// Sorted lexicographically
    ids: Vec<String>,
}

impl PrefixIndex {
    pub(crate) fn new(mut ids: Vec<String>) -> Self {
        ids.sort();
        Self { ids }
    }

    /// All ids starting with `prefix`, in sorted order.
    ///
    /// In a sorted list the ids sharing a prefix form a contiguous range
    /// starting at the first id >= prefix.
    pub(crate) fn candidates(&self, prefix: &str) -> &[String] {
        let start = self.ids.partition_point(|id| id.as_str() < prefix);
        let len = self.ids[start..].partition_point(|id| id.starts_with(prefix));
        &self.ids[start..start + len]
    }

    /// Resolve a prefix to exactly one full id.
    pub(crate) fn resolve(&self, prefix: &str) -> Result<&str, StoreError> {
        // Exact match wins over prefix ambiguity
        if let Ok(idx) = self.ids.binary_search_by(|id| id.as_str().cmp(prefix)) {
            return Ok(self.ids[idx].as_str());
        }

        match self.candidates(prefix) {
            [] => Err(StoreError::NotFound {
                id: prefix.to_string(),
            }),
            [only] => Ok(only.as_str()),
            many => Err(StoreError::AmbiguousId {
                prefix: prefix.to_string(),
                candidates: many.to_vec(),
            }),
        }
    }
}
