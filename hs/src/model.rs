//! Corpus data model
//!
//! A context owns sessions, a session owns turns. Everything here is
//! immutable once loaded; ids are opaque tokens with no embedded meaning
//! (prefix addressing is a store capability, not an id format property).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context metadata: the root search scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextMeta {
    /// Human-readable context title
    pub title: String,
    /// What this context covers
    #[serde(default)]
    pub description: String,
    /// Session refs in chronological (recording) order
    pub sessions: Vec<SessionRef>,
}

/// Ordered reference to a session within a context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRef {
    /// Opaque session id, prefix-addressable
    pub id: String,
    /// Session title
    pub title: String,
}

/// One recorded conversation
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque session id, unique within the context
    pub id: String,
    /// Session title (the match target for session-level search)
    pub title: String,
    /// Turns in chronological (insertion) order
    pub turns: Vec<Turn>,
}

/// One exchange unit within a session
#[derive(Debug, Clone)]
pub struct Turn {
    /// Opaque turn id, unique within the context
    pub id: String,
    /// Back-reference to the owning session (lookup only, never ownership)
    pub session_id: String,
    /// Position within the session
    pub sequence_index: usize,
    /// Full text body
    pub content: String,
    /// Recording timestamp
    pub created_at: DateTime<Utc>,
}

/// On-disk turn record: one JSONL line in sessions/{session_id}.jsonl
///
/// `session_id` and `sequence_index` are derived at load time from the
/// file name and line position, so the record only carries the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TurnRecord {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TurnRecord {
    pub(crate) fn into_turn(self, session_id: &str, sequence_index: usize) -> Turn {
        Turn {
            id: self.id,
            session_id: session_id.to_string(),
            sequence_index,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Summary counts for a corpus
#[derive(Debug, Clone)]
pub struct CorpusStats {
    /// Number of sessions
    pub session_count: usize,
    /// Number of turns across all sessions
    pub turn_count: usize,
    /// Total bytes of turn content
    pub content_bytes: u64,
}
