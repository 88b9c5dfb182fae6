//! Error types for path resolution and directory preparation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or preparing output paths
#[derive(Error, Debug)]
pub enum PathError {
    /// The path has no usable base name (empty, a root, or ending in a separator, `.` or `..`)
    #[error("Invalid path {0:?}: a non-empty file name is required")]
    InvalidArgument(PathBuf),

    /// A filesystem query or directory creation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// Path the failing operation was applied to
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl PathError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type using [`PathError`]
pub type Result<T> = std::result::Result<T, PathError>;
