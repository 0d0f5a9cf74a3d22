//! Snippet extraction around content matches

/// Text surrounding one content-level match
///
/// Snippets for overlapping match spans are computed independently and may
/// repeat text; merging them is a presentation concern, not an engine one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Up to `context_chars` characters before the match
    pub before: String,
    /// Up to `context_chars` characters after the match
    pub after: String,
}

impl Snippet {
    /// Extract up to `context_chars` characters on each side of the
    /// `[start, end)` byte span, clamped to the content bounds.
    ///
    /// `start` and `end` must lie on character boundaries (regex match
    /// spans always do). Counting is per character, not per byte, so
    /// multi-byte text never gets split.
    pub fn extract(content: &str, start: usize, end: usize, context_chars: usize) -> Self {
        let before_chars: Vec<char> = content[..start].chars().collect();
        let skip = before_chars.len().saturating_sub(context_chars);
        let before = before_chars[skip..].iter().collect();

        let after = content[end..].chars().take(context_chars).collect();

        Self { before, after }
    }
}
