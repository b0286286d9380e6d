use std::fmt;
use std::path::PathBuf;

/// One located match of the search pattern.
///
/// Equality is structural: two occurrences are equal iff file, line, and
/// offset all match. Values are created by the file scanner, streamed to the
/// caller, and discarded; nothing outlives the invocation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    /// The file the match was found in
    pub file: PathBuf,
    /// The line number where the match was found (1-based)
    pub line: usize,
    /// The column offset of the match within the line (1-based)
    pub offset: usize,
}

impl Occurrence {
    pub fn new(file: impl Into<PathBuf>, line: usize, offset: usize) -> Self {
        Self {
            file: file.into(),
            line,
            offset,
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File='{}', Line={}, Offset={}",
            self.file.display(),
            self.line,
            self.offset
        )
    }
}
