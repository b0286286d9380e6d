use ignore::WalkBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name suffix excluded from every search (case-sensitive, exact).
pub const EXCLUDED_SUFFIX: &str = ".log";

/// Decides whether a file name is eligible for scanning.
///
/// Log files are never scanned, regardless of their content. The suffix is
/// compared byte-wise so names that are not valid UTF-8 are still excluded
/// when they end in `.log`.
pub fn is_candidate_name(path: &Path) -> bool {
    match path.file_name() {
        Some(name) => !name.as_encoded_bytes().ends_with(EXCLUDED_SUFFIX.as_bytes()),
        None => true,
    }
}

/// Checks that the process can currently open the file for reading.
fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// Walks the tree under `root` and returns every file eligible for scanning.
///
/// The walk itself is synchronous and single-threaded; only the per-file
/// scanning that follows is parallelized. Hidden files and ignore files are
/// visited like any other entry. Directories, non-regular entries,
/// unreadable files, and walk errors are silently excluded.
pub fn list_candidates(root: &Path) -> Vec<PathBuf> {
    let mut walker = WalkBuilder::new(root);
    walker.standard_filters(false).follow_links(false);

    let candidates: Vec<PathBuf> = walker
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| is_candidate_name(entry.path()))
        .filter(|entry| is_readable(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    debug!(
        "Found {} candidate files under {}",
        candidates.len(),
        root.display()
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_candidate_name() {
        assert!(is_candidate_name(Path::new("notes.txt")));
        assert!(is_candidate_name(Path::new("log"))); // no suffix match
        assert!(is_candidate_name(Path::new("catalog.txt")));
        assert!(!is_candidate_name(Path::new("server.log")));
        assert!(!is_candidate_name(Path::new("nested/dir/app.log")));
        // Case-sensitive: only the exact lowercase suffix is excluded.
        assert!(is_candidate_name(Path::new("server.LOG")));
    }

    #[test]
    #[cfg(unix)]
    fn test_is_candidate_name_with_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let excluded = Path::new(OsStr::from_bytes(b"\xff\xfe.log"));
        assert!(!is_candidate_name(excluded));

        let kept = Path::new(OsStr::from_bytes(b"\xff\xfedata.txt"));
        assert!(is_candidate_name(kept));
    }

    #[test]
    fn test_list_candidates_recurses_into_subdirectories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
        std::fs::write(dir.path().join("top.txt"), "x").unwrap();
        std::fs::write(dir.path().join("a/middle.txt"), "x").unwrap();
        std::fs::write(dir.path().join("a/b/deep.txt"), "x").unwrap();

        let mut candidates = list_candidates(dir.path());
        candidates.sort();
        assert_eq!(
            candidates,
            vec![
                dir.path().join("a/b/deep.txt"),
                dir.path().join("a/middle.txt"),
                dir.path().join("top.txt"),
            ]
        );
    }

    #[test]
    fn test_list_candidates_excludes_log_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("keep.txt"), "x").unwrap();
        std::fs::write(dir.path().join("ignored.log"), "x").unwrap();

        let candidates = list_candidates(dir.path());
        assert_eq!(candidates, vec![dir.path().join("keep.txt")]);
    }

    #[test]
    fn test_list_candidates_excludes_directories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        assert!(list_candidates(dir.path()).is_empty());
    }

    #[test]
    fn test_list_candidates_includes_hidden_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".hidden.txt"), "x").unwrap();

        assert_eq!(
            list_candidates(dir.path()),
            vec![dir.path().join(".hidden.txt")]
        );
    }

    #[test]
    fn test_list_candidates_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(list_candidates(dir.path()).is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_list_candidates_excludes_unreadable_files() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked.txt");
        std::fs::write(&locked, "x").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        std::fs::write(dir.path().join("open.txt"), "x").unwrap();

        let candidates = list_candidates(dir.path());
        // Running as root bypasses permission bits, in which case both files
        // are readable and the filter keeps them.
        if !candidates.contains(&locked) {
            assert_eq!(candidates, vec![dir.path().join("open.txt")]);
        }

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
    }
}
