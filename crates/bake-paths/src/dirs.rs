//! Directory preparation before a save

use std::path::Path;

use crate::error::{PathError, Result};
use crate::fs::FileSystem;

/// Make sure `dir` exists, creating it and any missing parents
///
/// An empty `dir` stands for the current directory and is left alone.
pub fn ensure_directory_exists<F: FileSystem>(fs: &F, dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    let exists = fs
        .exists(dir)
        .map_err(|source| PathError::io(dir, source))?;
    if !exists {
        fs.create_dir_all(dir)
            .map_err(|source| PathError::io(dir, source))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{MemoryFileSystem, StdFileSystem};

    #[test]
    fn test_empty_directory_is_noop() {
        let fs = MemoryFileSystem::new();
        ensure_directory_exists(&fs, Path::new("")).unwrap();
        assert!(fs.is_empty());
    }

    #[test]
    fn test_missing_directory_is_created() {
        let fs = MemoryFileSystem::new();
        ensure_directory_exists(&fs, Path::new("Assets/Baked")).unwrap();
        assert!(fs.exists(Path::new("Assets/Baked")).unwrap());
    }

    #[test]
    fn test_creates_nested_directories_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("Assets").join("Baked").join("Textures");

        ensure_directory_exists(&StdFileSystem, &nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_directory_exists(&StdFileSystem, &nested).unwrap();
    }

    #[test]
    fn test_failed_check_reports_directory() {
        let fs = MemoryFileSystem::new().fail_on("Locked");
        let err = ensure_directory_exists(&fs, Path::new("Locked")).unwrap_err();
        assert!(matches!(err, PathError::Io { ref path, .. } if path == Path::new("Locked")));
    }
}
