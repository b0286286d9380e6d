use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use super::matcher::PatternMatcher;
use super::scanner::{FileScanner, ScanStatus};
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::filters::list_candidates;
use crate::metrics::SearchMetrics;
use crate::results::Occurrence;

/// Starts a concurrent search and returns the stream of occurrences.
///
/// The candidate file list is materialized up front by a single synchronous
/// walk; one scan task per file is then dispatched onto a dedicated worker
/// pool, and this function returns as soon as the tasks are queued. Matches
/// arrive on the returned [`OccurrenceStream`] as workers find them.
///
/// An empty pattern fails here, synchronously, before any filesystem access.
/// Per-file read failures never surface: the failing file contributes zero
/// occurrences, the failure is counted in the stream's metrics, and every
/// other file proceeds normally.
pub fn search(config: &SearchConfig) -> SearchResult<OccurrenceStream> {
    if config.pattern.is_empty() {
        return Err(SearchError::EmptyPattern);
    }

    info!(
        "Starting search for '{}' in {}",
        config.pattern,
        config.root_path.display()
    );

    let files = list_candidates(&config.root_path);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .thread_name(|index| format!("linescout-scan-{index}"))
        .build()
        .map_err(|err| SearchError::ThreadPool(err.to_string()))?;

    let scanner = Arc::new(FileScanner::new(PatternMatcher::new(&config.pattern)));
    let metrics = SearchMetrics::new();
    let cancelled = Arc::new(AtomicBool::new(false));
    let (sender, receiver) = crossbeam_channel::unbounded();
    // Never carries a message. Every task owns a clone of the sender and
    // drops it on exit; the disconnect is what stream drop waits on.
    let (done_sender, done_receiver) = crossbeam_channel::unbounded::<()>();

    for path in files {
        let sender = sender.clone();
        let scanner = Arc::clone(&scanner);
        let metrics = metrics.clone();
        let cancelled = Arc::clone(&cancelled);
        let done = done_sender.clone();
        pool.spawn(move || {
            let _done = done;
            // Tasks still queued when the stream is dropped exit before
            // touching their file.
            if cancelled.load(Ordering::Relaxed) {
                return;
            }
            let status = scanner.scan_each(
                &path,
                |occurrence| sender.send(occurrence).is_ok(),
                || !cancelled.load(Ordering::Relaxed),
            );
            match status {
                ScanStatus::Completed { occurrences } => metrics.record_scanned(occurrences),
                ScanStatus::Failed { error } => {
                    debug!("Skipping {}: {}", path.display(), error);
                    metrics.record_failure();
                }
                // The consumer dropped the stream; nothing left to account for.
                ScanStatus::Interrupted => {}
            }
        });
    }
    // Workers hold the remaining senders; the channel disconnects when the
    // last task finishes, which is what terminates the stream.
    drop(sender);
    drop(done_sender);

    Ok(OccurrenceStream {
        receiver,
        metrics,
        cancelled,
        done: done_receiver,
        pool,
    })
}

/// A pull-based stream of occurrences from an in-flight search.
///
/// The stream stays open while any scan task is still running and terminates
/// once all of them have finished. No ordering is guaranteed across files;
/// within one file, occurrences arrive in line order and, within a line,
/// left to right.
///
/// The underlying channel is unbounded, so producers never wait on the
/// consumer; memory grows with the burst of unconsumed matches.
///
/// Dropping the stream early cancels the search: a cancellation flag checked
/// once per scanned line makes every worker abandon its file promptly (even
/// a file with no matches), queued tasks exit without opening their file,
/// and the drop blocks until the last worker has stopped, so no task
/// outlives the stream.
#[derive(Debug)]
pub struct OccurrenceStream {
    receiver: Receiver<Occurrence>,
    metrics: SearchMetrics,
    cancelled: Arc<AtomicBool>,
    done: Receiver<()>,
    pool: rayon::ThreadPool,
}

impl OccurrenceStream {
    /// Progress counters shared with the worker tasks.
    ///
    /// After the stream terminates these distinguish "no file matched" from
    /// "files could not be read"; while it is open they are a live snapshot.
    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Number of worker threads serving this search.
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Iterator for OccurrenceStream {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        self.receiver.recv().ok()
    }
}

impl Drop for OccurrenceStream {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        // Nothing is ever sent on `done`: recv returns an error only once
        // every task has dropped its handle. This is the join.
        while self.done.recv().is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Occurrence;
    use std::num::NonZeroUsize;
    use tempfile::tempdir;

    fn config_for(pattern: &str, root: &std::path::Path) -> SearchConfig {
        SearchConfig {
            pattern: pattern.to_string(),
            root_path: root.to_path_buf(),
            thread_count: NonZeroUsize::new(2).unwrap(),
            log_level: "warn".to_string(),
            log_file: None,
        }
    }

    #[test]
    fn test_search_streams_all_occurrences() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("doc.txt"),
            "This line contains the word Kotlin once.\n\
             This line has Kotlin and more Kotlin.",
        )
        .unwrap();

        let stream = search(&config_for("Kotlin", dir.path())).unwrap();
        let mut occurrences: Vec<Occurrence> = stream.collect();
        occurrences.sort_by_key(|occ| (occ.line, occ.offset));

        let path = dir.path().join("doc.txt");
        assert_eq!(
            occurrences,
            vec![
                Occurrence::new(&path, 1, 29),
                Occurrence::new(&path, 2, 15),
                Occurrence::new(&path, 2, 31),
            ]
        );
    }

    #[test]
    fn test_empty_pattern_fails_before_any_io() {
        let missing_root = std::path::Path::new("/definitely/not/a/real/root");
        let result = search(&config_for("", missing_root));
        match result {
            Err(SearchError::EmptyPattern) => {}
            other => panic!("expected EmptyPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_directory_terminates_cleanly() {
        let dir = tempdir().unwrap();
        let stream = search(&config_for("Kotlin", dir.path())).unwrap();
        assert_eq!(stream.count(), 0);
    }

    #[test]
    fn test_worker_count_matches_configuration() {
        let dir = tempdir().unwrap();
        let stream = search(&config_for("Kotlin", dir.path())).unwrap();
        assert_eq!(stream.worker_count(), 2);
    }

    #[test]
    fn test_log_files_never_contribute() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("ignored.log"),
            "This Kotlin mention should be ignored by the search.",
        )
        .unwrap();

        let stream = search(&config_for("Kotlin", dir.path())).unwrap();
        assert_eq!(stream.count(), 0);
    }

    #[test]
    fn test_metrics_distinguish_failures_from_no_matches() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("clean.txt"), "no matches here\n").unwrap();
        std::fs::write(dir.path().join("binary.dat"), b"\xff\xfe\xfd").unwrap();

        let mut stream = search(&config_for("Kotlin", dir.path())).unwrap();
        assert!(stream.next().is_none());

        let stats = stream.metrics().snapshot();
        assert_eq!(stats.files_scanned, 1);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.occurrences_emitted, 0);
    }

    #[test]
    fn test_dropping_the_stream_stops_all_workers() {
        let dir = tempdir().unwrap();
        let file_count = 200;
        for i in 0..file_count {
            let contents = "Kotlin matches on every line\n".repeat(500);
            std::fs::write(dir.path().join(format!("file_{i}.txt")), contents).unwrap();
        }

        let mut config = config_for("Kotlin", dir.path());
        config.thread_count = NonZeroUsize::new(1).unwrap();

        let mut stream = search(&config).unwrap();
        assert!(stream.next().is_some());

        // Keep a handle on the shared counters, then drop mid-stream. The
        // drop must not return until every worker has stopped.
        let metrics = stream.metrics().clone();
        drop(stream);

        let after_drop = metrics.snapshot();
        assert!(
            after_drop.files_scanned < file_count,
            "cancellation should cut the scan short, but {} of {} files were fully scanned",
            after_drop.files_scanned,
            file_count
        );

        // No surviving worker means the counters cannot move anymore.
        std::thread::sleep(std::time::Duration::from_millis(50));
        let later = metrics.snapshot();
        assert_eq!(after_drop.files_scanned, later.files_scanned);
        assert_eq!(after_drop.files_failed, later.files_failed);
        assert_eq!(after_drop.occurrences_emitted, later.occurrences_emitted);
    }
}
