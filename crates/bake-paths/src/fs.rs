//! Filesystem collaborators used by path resolution
//!
//! The resolver only needs to ask whether an entry exists; directory
//! preparation additionally needs to create directories. Both are expressed by
//! the [`FileSystem`] trait.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal view of a filesystem
pub trait FileSystem {
    /// Whether any entry (file, directory, ...) exists at `path`
    ///
    /// Returns an error when existence cannot be determined, e.g. because a
    /// parent directory is not readable.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Create `path` and all missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }
}

/// The real filesystem, through `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// An in-memory set of paths
///
/// Every inserted path is an entry; creating a directory inserts it and each
/// of its ancestors. Paths registered with [`MemoryFileSystem::fail_on`] make
/// `exists` return a permission error, which is useful for exercising error
/// propagation.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    entries: RefCell<HashSet<PathBuf>>,
    failing: HashSet<PathBuf>,
}

impl MemoryFileSystem {
    /// Create an empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filesystem that already contains the given files
    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let fs = Self::new();
        for file in files {
            fs.insert(file);
        }
        fs
    }

    /// Add an entry
    pub fn insert<P: AsRef<Path>>(&self, path: P) {
        self.entries
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// Remove an entry, returning whether it was present
    pub fn remove<P: AsRef<Path>>(&self, path: P) -> bool {
        self.entries.borrow_mut().remove(path.as_ref())
    }

    /// Make existence checks on `path` fail with `PermissionDenied`
    #[must_use]
    pub fn fail_on<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.failing.insert(path.as_ref().to_path_buf());
        self
    }

    /// Number of entries currently present
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no entries are present
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("access to {} denied", path.display()),
            ));
        }
        Ok(self.entries.borrow().contains(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.entries.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            entries.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fs_insert_and_remove() {
        let fs = MemoryFileSystem::new();
        assert!(fs.is_empty());

        fs.insert("Assets/Tex.png");
        assert!(fs.exists(Path::new("Assets/Tex.png")).unwrap());
        assert!(!fs.exists(Path::new("Assets/Other.png")).unwrap());

        assert!(fs.remove("Assets/Tex.png"));
        assert!(!fs.exists(Path::new("Assets/Tex.png")).unwrap());
    }

    #[test]
    fn test_memory_fs_create_dir_all_adds_ancestors() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("Assets/Baked/Meshes")).unwrap();

        assert!(fs.exists(Path::new("Assets")).unwrap());
        assert!(fs.exists(Path::new("Assets/Baked")).unwrap());
        assert!(fs.exists(Path::new("Assets/Baked/Meshes")).unwrap());
        assert_eq!(fs.len(), 3);
    }

    #[test]
    fn test_memory_fs_failing_path() {
        let fs = MemoryFileSystem::new().fail_on("locked/file.png");
        let err = fs.exists(Path::new("locked/file.png")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_std_fs_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("mesh.asset");

        assert!(!StdFileSystem.exists(&file).unwrap());
        std::fs::write(&file, b"{}").unwrap();
        assert!(StdFileSystem.exists(&file).unwrap());
        assert!(StdFileSystem.exists(dir.path()).unwrap());
    }
}
