//! HistoryQuery - layered regex search over recorded conversations
//!
//! Executes compiled regex queries against one level of a read-only
//! [`historystore`] corpus (session titles, turn content, or turn content
//! with snippets), with stable chronological ordering, windowed pagination
//! and cooperative cancellation for expensive unscoped scans.
//!
//! The intended workflow is broad-to-deep: enumerate sessions, search wide
//! at session/turn level, inspect the match count, then narrow to a
//! content-level search scoped to specific turn ids. Every call is fully
//! self-describing (pattern, level, scope, window) - there is no hidden
//! investigation state between calls, so concurrent callers are safe by
//! construction.
//!
//! # Example
//!
//! ```ignore
//! use historyquery::{CancelToken, CompiledQuery, EntityKind, MatchMode, SearchEngine, SearchScope};
//! use historystore::CorpusStore;
//!
//! let store = CorpusStore::open(".historystore")?;
//! let query = CompiledQuery::compile("auth|token", EntityKind::Turn)?;
//! let engine = SearchEngine::new(&store);
//! let page = engine.search(&query, &SearchScope::all(), 0, 20,
//!                          MatchMode::Occurrences, &CancelToken::none())?;
//! println!("{} matches", page.window.total_count);
//! ```

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod search;
pub mod snippet;
pub mod window;

pub use cancel::CancelToken;
pub use error::QueryError;
pub use query::{CompiledQuery, EntityKind};
pub use search::{MatchHit, MatchMode, SearchEngine, SearchPage, SearchScope};
pub use snippet::Snippet;
pub use window::QueryWindow;

/// Default page size
pub const DEFAULT_LIMIT: usize = 20;

/// Default characters of context on each side of a content match
pub const DEFAULT_SNIPPET_CONTEXT: usize = 80;
