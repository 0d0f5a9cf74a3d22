//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the corpus store
///
/// A bad id is always a distinct error, never an empty result: callers must
/// be able to tell "zero matches" apart from "unknown id".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No session or turn matches id: {id}")]
    NotFound { id: String },

    #[error("Id prefix '{prefix}' is ambiguous, matches: {}", candidates.join(", "))]
    AmbiguousId { prefix: String, candidates: Vec<String> },

    #[error("Malformed corpus at {}: {detail}", path.display())]
    MalformedCorpus { path: PathBuf, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_id_lists_candidates() {
        let err = StoreError::AmbiguousId {
            prefix: "ab".to_string(),
            candidates: vec!["abc123".to_string(), "abd987".to_string()],
        };

        let msg = err.to_string();
        assert!(msg.contains("'ab'"));
        assert!(msg.contains("abc123"));
        assert!(msg.contains("abd987"));
    }

    #[test]
    fn test_not_found_names_the_id() {
        let err = StoreError::NotFound {
            id: "zzz_nonexistent".to_string(),
        };

        assert!(err.to_string().contains("zzz_nonexistent"));
    }

    #[test]
    fn test_malformed_corpus_names_the_path() {
        let err = StoreError::MalformedCorpus {
            path: PathBuf::from("/tmp/corpus/context.yml"),
            detail: "missing sessions list".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("context.yml"));
        assert!(msg.contains("missing sessions list"));
    }
}
