//! Query compilation
//!
//! A pattern is compiled exactly once and reused across every page of the
//! same query, so pagination stays deterministic: no per-call anchoring
//! differences can creep in between pages.

use clap::ValueEnum;
use regex::Regex;
use tracing::debug;

use crate::error::QueryError;

/// Which corpus level a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    /// Match against session titles
    Session,
    /// Match against turn content
    Turn,
    /// Match against turn content, extracting snippets around each hit
    Content,
}

/// A regex pattern compiled for one corpus level
///
/// No synonym expansion happens here: alternative keywords are the
/// caller's job, expressed as a single alternation (`a|b|c`).
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pattern: String,
    kind: EntityKind,
    regex: Regex,
}

impl CompiledQuery {
    /// Compile a pattern, failing immediately on anything invalid.
    ///
    /// Zero-width patterns (anything that can match the empty string, like
    /// `a*` or a dangling alternation branch) are rejected up front: they
    /// would hit at every offset of every entity.
    pub fn compile(pattern: &str, kind: EntityKind) -> Result<Self, QueryError> {
        let regex = Regex::new(pattern).map_err(|e| QueryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        if regex.is_match("") {
            return Err(QueryError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern can match the empty string".to_string(),
            });
        }

        debug!(%pattern, ?kind, "Compiled query");
        Ok(Self {
            pattern: pattern.to_string(),
            kind,
            regex,
        })
    }

    /// The original pattern text
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The corpus level this query targets
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}
