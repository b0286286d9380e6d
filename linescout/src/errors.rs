use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("The string to search for cannot be empty.")]
    EmptyPattern,
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Invalid UTF-8 in file: {0}")]
    EncodingError(PathBuf),
    #[error("The directory name cannot be empty.")]
    InvalidDirectoryName,
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("Failed to build scan thread pool: {0}")]
    ThreadPool(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn encoding_error(path: impl Into<PathBuf>) -> Self {
        Self::EncodingError(path.into())
    }

    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an IO error raised while reading one file to the search taxonomy.
    pub(crate) fn from_file_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            std::io::ErrorKind::InvalidData => Self::encoding_error(path),
            _ => Self::IoError(err),
        }
    }
}
