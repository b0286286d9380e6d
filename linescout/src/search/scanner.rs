use std::fs;
use std::path::Path;
use tracing::trace;

use super::matcher::PatternMatcher;
use crate::errors::{SearchError, SearchResult};
use crate::results::Occurrence;

/// Outcome of scanning one file on a worker task.
///
/// A failed file contributes zero occurrences and never aborts the overall
/// search; the failure detail is carried here so the coordinator can record
/// it instead of silently discarding it.
#[derive(Debug)]
pub enum ScanStatus {
    /// The whole file was scanned and every occurrence was emitted.
    Completed { occurrences: u64 },
    /// The file could not be read or decoded; nothing was emitted.
    Failed { error: SearchError },
    /// The consumer went away or the search was cancelled; the scan was
    /// abandoned mid-file.
    Interrupted,
}

/// Scans single files line by line for pattern occurrences.
///
/// Each scan is isolated: one file's failure is reported through its own
/// [`ScanStatus`] and cannot affect any other file.
#[derive(Debug, Clone)]
pub struct FileScanner {
    matcher: PatternMatcher,
}

impl FileScanner {
    /// Creates a scanner that searches for the matcher's pattern.
    pub fn new(matcher: PatternMatcher) -> Self {
        Self { matcher }
    }

    /// Scans a file and collects every occurrence it contains.
    ///
    /// Lines are numbered from 1; within a line, offsets are reported left to
    /// right. Read, decode, and permission failures are returned as errors,
    /// in which case the file contributes no occurrences at all.
    pub fn scan(&self, path: &Path) -> SearchResult<Vec<Occurrence>> {
        let mut occurrences = Vec::new();
        match self.scan_each(
            path,
            |occurrence| {
                occurrences.push(occurrence);
                true
            },
            || true,
        ) {
            ScanStatus::Failed { error } => Err(error),
            ScanStatus::Completed { .. } | ScanStatus::Interrupted => Ok(occurrences),
        }
    }

    /// Scans a file, handing each occurrence to `emit` as it is found.
    ///
    /// `emit` returns whether the scan should continue; a `false` means the
    /// consumer went away and the remainder of the file is skipped.
    /// `keep_going` is consulted once per line, so a scan is abandoned
    /// promptly even when the file contains no occurrences at all. The file
    /// content is read in full before anything is emitted, so a read or
    /// decode failure always means zero emitted occurrences.
    pub(crate) fn scan_each<F, C>(&self, path: &Path, mut emit: F, mut keep_going: C) -> ScanStatus
    where
        F: FnMut(Occurrence) -> bool,
        C: FnMut() -> bool,
    {
        trace!("Scanning file: {}", path.display());

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                return ScanStatus::Failed {
                    error: SearchError::from_file_io(path, err),
                }
            }
        };

        let mut emitted = 0u64;
        for (index, line) in contents.lines().enumerate() {
            if !keep_going() {
                return ScanStatus::Interrupted;
            }
            let line_number = index + 1;
            for offset in self.matcher.find_offsets(line) {
                emitted += 1;
                if !emit(Occurrence::new(path, line_number, offset)) {
                    return ScanStatus::Interrupted;
                }
            }
        }

        ScanStatus::Completed {
            occurrences: emitted,
        }
    }
}
