use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// Resolves a user-supplied directory name against a base directory.
///
/// This is the boundary between what a user types and the root path the
/// search core receives: a blank name is an input error, a name that does
/// not resolve to an existing directory is a not-found error, and the two
/// are reported distinctly. The search core itself never calls this; it
/// assumes a valid root.
pub fn resolve_search_root(base: &Path, name: &str) -> SearchResult<PathBuf> {
    if name.trim().is_empty() {
        return Err(SearchError::InvalidDirectoryName);
    }

    let candidate = base.join(name);
    if !candidate.is_dir() {
        return Err(SearchError::directory_not_found(candidate));
    }

    Ok(candidate)
}
