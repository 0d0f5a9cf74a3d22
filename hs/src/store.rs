//! Read-only corpus store
//!
//! Loads the whole corpus into memory at open time. That snapshot never
//! changes afterwards, so lookups hand out borrows and concurrent searches
//! need no coordination.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::model::{ContextMeta, CorpusStats, Session, SessionRef, Turn, TurnRecord};
use crate::resolve::{IdKind, PrefixIndex};

/// Context metadata file at the corpus root
pub const CONTEXT_FILE: &str = "context.yml";
/// Directory holding one JSONL file per session
pub const SESSIONS_DIR: &str = "sessions";

/// Outcome of cross-namespace prefix resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    pub kind: IdKind,
    pub id: String,
}

/// The corpus store: a read-only snapshot of one context
#[derive(Debug)]
pub struct CorpusStore {
    base_path: PathBuf,
    meta: ContextMeta,
    /// Sessions in context order, turns in sequence order
    sessions: Vec<Session>,
    session_index: HashMap<String, usize>,
    /// turn id -> (session index, turn index)
    turn_index: HashMap<String, (usize, usize)>,
    session_ids: PrefixIndex,
    turn_ids: PrefixIndex,
}

impl CorpusStore {
    /// Open a corpus directory and load it fully into memory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        let context_path = base_path.join(CONTEXT_FILE);

        let raw = fs::read_to_string(&context_path).map_err(|e| StoreError::MalformedCorpus {
            path: context_path.clone(),
            detail: format!("cannot read context file: {e}"),
        })?;
        let meta: ContextMeta =
            serde_yaml::from_str(&raw).map_err(|e| StoreError::MalformedCorpus {
                path: context_path.clone(),
                detail: e.to_string(),
            })?;

        let mut sessions = Vec::with_capacity(meta.sessions.len());
        let mut session_index = HashMap::new();
        let mut turn_index = HashMap::new();

        for (session_idx, session_ref) in meta.sessions.iter().enumerate() {
            let session_path = base_path
                .join(SESSIONS_DIR)
                .join(format!("{}.jsonl", session_ref.id));
            let turns = load_turns(&session_path, &session_ref.id)?;

            if session_index
                .insert(session_ref.id.clone(), session_idx)
                .is_some()
            {
                return Err(StoreError::MalformedCorpus {
                    path: context_path,
                    detail: format!("duplicate session id: {}", session_ref.id),
                });
            }
            for (turn_idx, turn) in turns.iter().enumerate() {
                if turn_index
                    .insert(turn.id.clone(), (session_idx, turn_idx))
                    .is_some()
                {
                    return Err(StoreError::MalformedCorpus {
                        path: session_path,
                        detail: format!("duplicate turn id: {}", turn.id),
                    });
                }
            }

            debug!(session_id = %session_ref.id, turn_count = turns.len(), "Loaded session");
            sessions.push(Session {
                id: session_ref.id.clone(),
                title: session_ref.title.clone(),
                turns,
            });
        }

        let session_ids = PrefixIndex::new(session_index.keys().cloned().collect());
        let turn_ids = PrefixIndex::new(turn_index.keys().cloned().collect());

        info!(
            session_count = sessions.len(),
            turn_count = turn_index.len(),
            "Opened corpus store"
        );

        Ok(Self {
            base_path,
            meta,
            sessions,
            session_index,
            turn_index,
            session_ids,
            turn_ids,
        })
    }

    /// Context metadata (title, description, ordered session refs)
    pub fn context(&self) -> &ContextMeta {
        &self.meta
    }

    /// Session refs in chronological order
    pub fn list_sessions(&self) -> &[SessionRef] {
        &self.meta.sessions
    }

    /// All sessions with their turns, in chronological order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Look up one session by full id
    pub fn session(&self, session_id: &str) -> Result<&Session, StoreError> {
        self.session_index
            .get(session_id)
            .map(|&idx| &self.sessions[idx])
            .ok_or_else(|| StoreError::NotFound {
                id: session_id.to_string(),
            })
    }

    /// Ordered turns of one session
    pub fn turns(&self, session_id: &str) -> Result<&[Turn], StoreError> {
        Ok(&self.session(session_id)?.turns)
    }

    /// Look up one turn by full id
    pub fn turn(&self, turn_id: &str) -> Result<&Turn, StoreError> {
        self.turn_index
            .get(turn_id)
            .map(|&(s, t)| &self.sessions[s].turns[t])
            .ok_or_else(|| StoreError::NotFound {
                id: turn_id.to_string(),
            })
    }

    /// Full content of one turn
    pub fn content(&self, turn_id: &str) -> Result<&str, StoreError> {
        Ok(self.turn(turn_id)?.content.as_str())
    }

    /// Resolve a session id prefix to the full id
    pub fn resolve_session(&self, prefix: &str) -> Result<&str, StoreError> {
        self.session_ids.resolve(prefix)
    }

    /// Resolve a turn id prefix to the full id
    pub fn resolve_turn(&self, prefix: &str) -> Result<&str, StoreError> {
        self.turn_ids.resolve(prefix)
    }

    /// Resolve a prefix against both namespaces.
    ///
    /// A prefix shared by a session id and a turn id is ambiguous; the
    /// error lists candidates from both namespaces.
    pub fn resolve(&self, prefix: &str) -> Result<ResolvedId, StoreError> {
        if self.session_index.contains_key(prefix) {
            return Ok(ResolvedId {
                kind: IdKind::Session,
                id: prefix.to_string(),
            });
        }
        if self.turn_index.contains_key(prefix) {
            return Ok(ResolvedId {
                kind: IdKind::Turn,
                id: prefix.to_string(),
            });
        }

        let sessions = self.session_ids.candidates(prefix);
        let turns = self.turn_ids.candidates(prefix);
        match (sessions, turns) {
            ([], []) => Err(StoreError::NotFound {
                id: prefix.to_string(),
            }),
            ([only], []) => Ok(ResolvedId {
                kind: IdKind::Session,
                id: only.clone(),
            }),
            ([], [only]) => Ok(ResolvedId {
                kind: IdKind::Turn,
                id: only.clone(),
            }),
            (sessions, turns) => Err(StoreError::AmbiguousId {
                prefix: prefix.to_string(),
                candidates: sessions.iter().chain(turns).cloned().collect(),
            }),
        }
    }

    /// Summary counts for the whole corpus
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            session_count: self.sessions.len(),
            turn_count: self.turn_index.len(),
            content_bytes: self
                .sessions
                .iter()
                .flat_map(|s| &s.turns)
                .map(|t| t.content.len() as u64)
                .sum(),
        }
    }

    /// The directory this store was opened from
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

fn load_turns(session_path: &Path, session_id: &str) -> Result<Vec<Turn>, StoreError> {
    let file = fs::File::open(session_path).map_err(|e| StoreError::MalformedCorpus {
        path: session_path.to_path_buf(),
        detail: format!("cannot open session file: {e}"),
    })?;

    let mut turns = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TurnRecord =
            serde_json::from_str(&line).map_err(|e| StoreError::MalformedCorpus {
                path: session_path.to_path_buf(),
                detail: format!("line {}: {e}", line_no + 1),
            })?;
        turns.push(record.into_turn(session_id, turns.len()));
    }

    Ok(turns)
}
