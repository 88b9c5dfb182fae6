//! Never-clobber path resolution

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{PathError, Result};
use crate::fs::{FileSystem, StdFileSystem};

/// Resolves desired output paths to paths that do not exist yet
///
/// A taken path `dir/name.ext` is disambiguated as `dir/name (1).ext`,
/// `dir/name (2).ext`, ... and the lowest free counter wins. The search has no
/// upper bound.
///
/// Resolution only queries the filesystem. Nothing is reserved, so two callers
/// resolving the same name before either writes will get the same answer; the
/// caller that writes second overwrites the first.
#[derive(Debug, Clone, Default)]
pub struct UniquePathResolver<F> {
    fs: F,
}

impl<F: FileSystem> UniquePathResolver<F> {
    /// Create a resolver over the given filesystem
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// The filesystem this resolver queries
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Return `desired` if nothing exists there, otherwise the first free
    /// `"{stem} ({n}){ext}"` sibling with `n >= 1`
    ///
    /// # Errors
    ///
    /// [`PathError::InvalidArgument`] when `desired` has no file name, and
    /// [`PathError::Io`] when an existence check fails.
    pub fn resolve(&self, desired: &Path) -> Result<PathBuf> {
        let parts = PathParts::split(desired)?;

        if !self.exists(desired)? {
            return Ok(desired.to_path_buf());
        }

        let mut counter: u64 = 1;
        loop {
            let candidate = parts.with_counter(counter);
            if !self.exists(&candidate)? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        self.fs
            .exists(path)
            .map_err(|source| PathError::io(path, source))
    }
}

/// Resolve `desired` against the real filesystem
///
/// Shorthand for `UniquePathResolver::new(StdFileSystem).resolve(desired)`.
pub fn unique_path<P: AsRef<Path>>(desired: P) -> Result<PathBuf> {
    UniquePathResolver::new(StdFileSystem).resolve(desired.as_ref())
}

/// A path split into directory, base name and extension
struct PathParts<'a> {
    directory: Option<&'a Path>,
    stem: &'a std::ffi::OsStr,
    extension: Option<&'a std::ffi::OsStr>,
}

impl<'a> PathParts<'a> {
    fn split(path: &'a Path) -> Result<Self> {
        // `Path` drops a trailing separator or `.`, so check the raw last segment
        let text = path.to_string_lossy();
        let last_segment = text.rsplit(std::path::is_separator).next().unwrap_or_default();
        let names_a_file = !matches!(last_segment, "" | "." | "..");

        let stem = match path.file_stem() {
            Some(stem) if !stem.is_empty() && names_a_file => stem,
            _ => return Err(PathError::InvalidArgument(path.to_path_buf())),
        };

        Ok(Self {
            directory: path.parent().filter(|dir| !dir.as_os_str().is_empty()),
            stem,
            extension: path.extension(),
        })
    }

    fn with_counter(&self, counter: u64) -> PathBuf {
        let mut name = OsString::from(self.stem);
        name.push(format!(" ({counter})"));
        if let Some(extension) = self.extension {
            name.push(".");
            name.push(extension);
        }

        match self.directory {
            Some(directory) => directory.join(name),
            None => PathBuf::from(name),
        }
    }
}
