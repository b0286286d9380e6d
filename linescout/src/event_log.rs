use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;

/// Append-only, timestamped application event log.
///
/// Strictly best-effort: a log that cannot be written must never disturb the
/// search it observes, so every internal failure is reported through
/// `tracing` and swallowed. Construct one at startup and pass it by
/// reference to whatever layer wants it; the search core takes no log.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Creates an event log appending to `path`, creating parent directories
    /// if needed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(
                    "Could not create event log directory {}: {}",
                    parent.display(),
                    err
                );
            }
        }
        Self { path }
    }

    /// The file this log appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one timestamped message, best-effort.
    pub fn log(&self, message: &str) {
        let timestamp = humantime::format_rfc3339_seconds(SystemTime::now());
        let entry = format!("[INFO] [{timestamp}] {message}\n");

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(entry.as_bytes()));

        if let Err(err) = result {
            warn!("Event logging failed for {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_appends_timestamped_entries() {
        let dir = tempdir().unwrap();
        let log = EventLog::new(dir.path().join("logs/app.log"));

        log.log("Application started.");
        log.log("Search finished. Found a total of 3 occurrences.");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[INFO] ["));
        assert!(lines[0].ends_with("Application started."));
        assert!(lines[1].ends_with("Found a total of 3 occurrences."));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let log = EventLog::new(dir.path().join("deeply/nested/logs/app.log"));

        log.log("hello");
        assert!(log.path().exists());
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        // A directory path cannot be opened for appending; the failure must
        // be swallowed.
        let dir = tempdir().unwrap();
        let log = EventLog::new(dir.path());
        log.log("goes nowhere");
    }
}
