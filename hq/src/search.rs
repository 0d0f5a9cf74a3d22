//! Search engine
//!
//! Executes a compiled query against one corpus level, in stable
//! chronological order: sessions in context order, turns in sequence
//! order, hits in byte order within an entity. No relevance re-ranking.
//!
//! `total_count` always reflects the whole in-scope match list; the
//! returned hits are only the requested `[from, from + limit)` slice.

use std::collections::BTreeSet;

use historystore::CorpusStore;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::QueryError;
use crate::query::{CompiledQuery, EntityKind};
use crate::snippet::Snippet;
use crate::window::QueryWindow;

/// Restricts a turn- or content-level search to specific turns
#[derive(Debug, Clone, Default)]
pub struct SearchScope {
    /// Full turn ids (prefixes must be resolved first); `None` scans all
    pub turn_ids: Option<BTreeSet<String>>,
}

impl SearchScope {
    /// Scan the whole corpus. At content level this is the expensive path
    /// and the place a cancellation deadline matters.
    pub fn all() -> Self {
        Self::default()
    }

    /// Scan only the given turns
    pub fn turns(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            turn_ids: Some(ids.into_iter().collect()),
        }
    }

    fn admits(&self, turn_id: &str) -> bool {
        self.turn_ids.as_ref().is_none_or(|ids| ids.contains(turn_id))
    }
}

/// Whether every regex hit or only the first hit per entity is reported
///
/// Both modes are explicit API choices; the engine never silently picks
/// one over the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every occurrence is a separate hit, duplicates within one entity
    /// included
    Occurrences,
    /// One hit per matching entity, first occurrence only
    PerEntity,
}

/// One match produced by a search; transient, never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHit {
    /// Level the hit was found at
    pub kind: EntityKind,
    /// Owning session (equals `entity_id` for session-level hits)
    pub session_id: String,
    /// Id of the matched entity
    pub entity_id: String,
    /// Byte span of the match within the entity's match target
    pub start: usize,
    pub end: usize,
    /// The matched text itself
    pub matched_text: String,
    /// Surrounding context, content-level hits only
    pub snippet: Option<Snippet>,
}

/// One window of hits plus the full match count behind it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub hits: Vec<MatchHit>,
    pub window: QueryWindow,
}

/// Executes compiled queries against a read-only corpus snapshot
pub struct SearchEngine<'a> {
    store: &'a CorpusStore,
    snippet_context: usize,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a CorpusStore) -> Self {
        Self {
            store,
            snippet_context: crate::DEFAULT_SNIPPET_CONTEXT,
        }
    }

    /// Characters of context captured on each side of a content match
    pub fn with_snippet_context(mut self, context_chars: usize) -> Self {
        self.snippet_context = context_chars;
        self
    }

    /// Run one fully self-describing search.
    ///
    /// `from` past the end of the match list yields an empty page with the
    /// correct `total_count`; `limit = 0` is rejected before any scanning.
    pub fn search(
        &self,
        query: &CompiledQuery,
        scope: &SearchScope,
        from: usize,
        limit: usize,
        mode: MatchMode,
        cancel: &CancelToken,
    ) -> Result<SearchPage, QueryError> {
        QueryWindow::validate(from, limit)?;

        let hits = self.collect_hits(query, scope, mode, cancel)?;
        let window = QueryWindow::of(hits.len(), from, limit);
        let page: Vec<MatchHit> = hits
            .into_iter()
            .skip(window.from)
            .take(window.len())
            .collect();

        debug!(
            pattern = query.pattern(),
            total = window.total_count,
            from = window.from,
            to = window.to,
            "Search complete"
        );
        Ok(SearchPage { hits: page, window })
    }

    /// Full ordered match list for the query within scope.
    fn collect_hits(
        &self,
        query: &CompiledQuery,
        scope: &SearchScope,
        mode: MatchMode,
        cancel: &CancelToken,
    ) -> Result<Vec<MatchHit>, QueryError> {
        let mut hits = Vec::new();

        match query.kind() {
            EntityKind::Session => {
                for session in self.store.sessions() {
                    for m in query.regex().find_iter(&session.title) {
                        hits.push(MatchHit {
                            kind: EntityKind::Session,
                            session_id: session.id.clone(),
                            entity_id: session.id.clone(),
                            start: m.start(),
                            end: m.end(),
                            matched_text: m.as_str().to_string(),
                            snippet: None,
                        });
                        if mode == MatchMode::PerEntity {
                            break;
                        }
                    }
                }
            }
            kind @ (EntityKind::Turn | EntityKind::Content) => {
                let want_snippet = kind == EntityKind::Content;
                let mut scanned = 0usize;

                for session in self.store.sessions() {
                    for turn in &session.turns {
                        if cancel.is_cancelled() {
                            // Discard everything: a cancelled search never
                            // reports a truncated total_count.
                            return Err(QueryError::Cancelled {
                                scanned_turns: scanned,
                            });
                        }
                        if !scope.admits(&turn.id) {
                            continue;
                        }
                        scanned += 1;

                        for m in query.regex().find_iter(&turn.content) {
                            let snippet = want_snippet.then(|| {
                                Snippet::extract(
                                    &turn.content,
                                    m.start(),
                                    m.end(),
                                    self.snippet_context,
                                )
                            });
                            hits.push(MatchHit {
                                kind,
                                session_id: session.id.clone(),
                                entity_id: turn.id.clone(),
                                start: m.start(),
                                end: m.end(),
                                matched_text: m.as_str().to_string(),
                                snippet,
                            });
                            if mode == MatchMode::PerEntity {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use historystore::{CONTEXT_FILE, SESSIONS_DIR};
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_corpus(sessions: &[(&str, &str, &[(&str, &str)])]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let sessions_dir = temp.path().join(SESSIONS_DIR);
        fs::create_dir_all(&sessions_dir).unwrap();

        let mut context = String::from("title: test corpus\nsessions:\n");
        for (id, title, turns) in sessions {
            context.push_str(&format!("  - id: \"{id}\"\n    title: \"{title}\"\n"));

            let mut file = fs::File::create(sessions_dir.join(format!("{id}.jsonl"))).unwrap();
            for (turn_id, content) in *turns {
                let line = serde_json::json!({
                    "id": turn_id,
                    "content": content,
                    "created_at": "2025-06-01T12:00:00Z",
                });
                writeln!(file, "{line}").unwrap();
            }
        }
        fs::write(temp.path().join(CONTEXT_FILE), context).unwrap();
        temp
    }

    fn fixture() -> (TempDir, CorpusStore) {
        let temp = write_corpus(&[
            (
                "abc123ef-s1",
                "auth design",
                &[
                    ("t1aaaaaa-01", "let's use jwt for auth"),
                    ("t1bbbbbb-02", "switched to oauth2 refresh tokens"),
                ],
            ),
            (
                "abd987cd-s2",
                "db migration",
                &[("t2cccccc-01", "token token everywhere")],
            ),
        ]);
        let store = CorpusStore::open(temp.path()).unwrap();
        (temp, store)
    }

    fn query(pattern: &str, kind: EntityKind) -> CompiledQuery {
        CompiledQuery::compile(pattern, kind).unwrap()
    }

    #[test]
    fn test_turn_search_in_chronological_order() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);

        let page = engine
            .search(
                &query("auth|token", EntityKind::Turn),
                &SearchScope::all(),
                0,
                10,
                MatchMode::PerEntity,
                &CancelToken::none(),
            )
            .unwrap();

        assert_eq!(page.window.total_count, 3);
        let ids: Vec<&str> = page.hits.iter().map(|h| h.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["t1aaaaaa-01", "t1bbbbbb-02", "t2cccccc-01"]);
    }

    #[test]
    fn test_no_matches_is_success_with_zero_count() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);

        let page = engine
            .search(
                &query("zzz_nonexistent", EntityKind::Session),
                &SearchScope::all(),
                0,
                10,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();

        assert_eq!(page.window.total_count, 0);
        assert!(page.hits.is_empty());
    }

    #[test]
    fn test_session_search_targets_titles() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);

        let page = engine
            .search(
                &query("auth", EntityKind::Session),
                &SearchScope::all(),
                0,
                10,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();

        assert_eq!(page.window.total_count, 1);
        assert_eq!(page.hits[0].entity_id, "abc123ef-s1");
        assert_eq!(page.hits[0].session_id, "abc123ef-s1");
        assert_eq!(page.hits[0].matched_text, "auth");
        assert!(page.hits[0].snippet.is_none());
    }

    #[test]
    fn test_scoped_content_search_with_snippet() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store).with_snippet_context(8);

        let page = engine
            .search(
                &query("token", EntityKind::Content),
                &SearchScope::turns(["t1bbbbbb-02".to_string()]),
                0,
                10,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();

        assert_eq!(page.window.total_count, 1);
        let hit = &page.hits[0];
        assert_eq!(hit.entity_id, "t1bbbbbb-02");
        let snippet = hit.snippet.as_ref().unwrap();
        assert_eq!(snippet.before, "refresh ");
        // Clamped: "token" ends one char before the end of the turn
        assert_eq!(snippet.after, "s");
    }

    #[test]
    fn test_occurrences_vs_per_entity() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);
        let q = query("token", EntityKind::Turn);

        let every = engine
            .search(
                &q,
                &SearchScope::all(),
                0,
                10,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();
        // "tokens" once, "token token" twice
        assert_eq!(every.window.total_count, 3);

        let deduped = engine
            .search(
                &q,
                &SearchScope::all(),
                0,
                10,
                MatchMode::PerEntity,
                &CancelToken::none(),
            )
            .unwrap();
        assert_eq!(deduped.window.total_count, 2);
        assert_eq!(deduped.hits[1].entity_id, "t2cccccc-01");
        assert_eq!(deduped.hits[1].start, 0);
    }

    #[test]
    fn test_from_past_end_keeps_total_count() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);

        let page = engine
            .search(
                &query("auth", EntityKind::Turn),
                &SearchScope::all(),
                5,
                10,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();

        assert!(page.hits.is_empty());
        assert_eq!(page.window.total_count, 2);
    }

    #[test]
    fn test_zero_limit_rejected_before_scanning() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);

        let err = engine
            .search(
                &query("auth", EntityKind::Turn),
                &SearchScope::all(),
                0,
                0,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap_err();

        assert!(matches!(err, QueryError::InvalidWindow { limit: 0, .. }));
    }

    #[test]
    fn test_total_count_invariant_across_windows() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);
        let q = query("token", EntityKind::Turn);

        for (from, limit) in [(0, 1), (0, 10), (1, 2), (2, 1), (7, 3)] {
            let page = engine
                .search(
                    &q,
                    &SearchScope::all(),
                    from,
                    limit,
                    MatchMode::Occurrences,
                    &CancelToken::none(),
                )
                .unwrap();
            assert_eq!(page.window.total_count, 3, "window ({from}, {limit})");
        }
    }

    #[test]
    fn test_identical_calls_are_idempotent() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);
        let q = query("token", EntityKind::Content);

        let first = engine
            .search(
                &q,
                &SearchScope::all(),
                0,
                2,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();
        let second = engine
            .search(
                &q,
                &SearchScope::all(),
                0,
                2,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_adjacent_hits_get_independent_overlapping_snippets() {
        let temp = write_corpus(&[("s1-overlap", "one", &[("t1-overlap", "aaa")])]);
        let store = CorpusStore::open(temp.path()).unwrap();
        let engine = SearchEngine::new(&store).with_snippet_context(2);

        let page = engine
            .search(
                &query("a", EntityKind::Content),
                &SearchScope::all(),
                0,
                10,
                MatchMode::Occurrences,
                &CancelToken::none(),
            )
            .unwrap();

        // Three distinct hits whose snippet windows repeat the same text;
        // no merging happens at the engine level.
        assert_eq!(page.window.total_count, 3);
        let snippets: Vec<(&str, &str)> = page
            .hits
            .iter()
            .map(|h| {
                let s = h.snippet.as_ref().unwrap();
                (s.before.as_str(), s.after.as_str())
            })
            .collect();
        assert_eq!(snippets, vec![("", "aa"), ("a", "a"), ("aa", "")]);
    }

    #[test]
    fn test_cancelled_token_returns_no_results() {
        let (_temp, store) = fixture();
        let engine = SearchEngine::new(&store);

        let token = CancelToken::none();
        token.cancel();

        let err = engine
            .search(
                &query("token", EntityKind::Content),
                &SearchScope::all(),
                0,
                10,
                MatchMode::Occurrences,
                &token,
            )
            .unwrap_err();

        assert!(matches!(err, QueryError::Cancelled { scanned_turns: 0 }));
    }
}
