//! HistoryStore - read-only corpus of recorded conversations
//!
//! Stores a context (an ordered set of sessions, each an ordered set of
//! turns) on disk and exposes id-based and scan-based access to it. The
//! corpus is written once by an external ingestion process; this crate
//! never writes, so a loaded store is an immutable snapshot for its whole
//! lifetime and can be shared freely between concurrent searches.
//!
//! # Layout
//!
//! ```text
//! <corpus>/
//! ├── context.yml          # title, description, ordered session refs
//! └── sessions/
//!     ├── {session_id}.jsonl   # one JSON turn record per line
//!     └── ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use historystore::CorpusStore;
//!
//! let store = CorpusStore::open(".historystore")?;
//! let sessions = store.list_sessions();
//! let turns = store.turns(&sessions[0].id)?;
//! let full_id = store.resolve_turn("0192f3ab")?;
//! ```

pub mod error;
pub mod model;
mod resolve;
mod store;

pub use error::StoreError;
pub use model::{ContextMeta, CorpusStats, Session, SessionRef, Turn};
pub use resolve::IdKind;
pub use store::{CONTEXT_FILE, CorpusStore, ResolvedId, SESSIONS_DIR};
