/// Locates every occurrence of a literal pattern within single lines of text.
///
/// Matching is exact and case-sensitive. Matches are reported left to right
/// as 1-based column offsets, and they never overlap: once a match is found,
/// the scan cursor advances past its full length before searching resumes,
/// so `"aa"` in `"aaaa"` yields two matches, not three.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
}

impl PatternMatcher {
    /// Creates a matcher for the given literal pattern.
    ///
    /// The pattern must be non-empty; the search entry point rejects empty
    /// patterns before any matcher is constructed.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        debug_assert!(!pattern.is_empty(), "empty pattern must be rejected upstream");
        Self { pattern }
    }

    /// The literal pattern this matcher searches for.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Finds all non-overlapping occurrences of the pattern in `line`.
    ///
    /// Returns 1-based column offsets in strictly increasing order;
    /// consecutive offsets differ by at least the pattern length.
    pub fn find_offsets(&self, line: &str) -> Vec<usize> {
        let mut offsets = Vec::new();
        let mut cursor = 0;

        while cursor < line.len() {
            match line[cursor..].find(&self.pattern) {
                Some(index) => {
                    let start = cursor + index;
                    offsets.push(start + 1);
                    cursor = start + self.pattern.len();
                }
                None => break,
            }
        }

        offsets
    }
}
