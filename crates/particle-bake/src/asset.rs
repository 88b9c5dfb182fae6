//! Asset persistence collaborator

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BakeError, Result};
use crate::mesh::BakedObject;

/// On-disk representation of a baked mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// Pretty-printed JSON (`.asset`, `.json`)
    Json,
    /// Wavefront OBJ (`.obj`)
    Obj,
}

impl MeshFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "asset" | "json" => Some(Self::Json),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }
}

/// Persists baked results
pub trait AssetStore {
    /// Whether `path` names a mesh format this store can write
    fn supports_mesh(&self, path: &Path) -> bool {
        MeshFormat::from_path(path).is_some()
    }

    /// Save a baked mesh at `path`
    fn save_mesh(&mut self, object: &BakedObject, path: &Path) -> Result<()>;

    /// Save raw file bytes (an encoded image) at `path`
    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Writes assets straight to the filesystem
#[derive(Debug, Default)]
pub struct FsAssetStore {
    written: Vec<PathBuf>,
}

impl FsAssetStore {
    /// Create a store
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl AssetStore for FsAssetStore {
    fn save_mesh(&mut self, object: &BakedObject, path: &Path) -> Result<()> {
        let format = MeshFormat::from_path(path)
            .ok_or_else(|| BakeError::UnsupportedMeshFormat(path.to_path_buf()))?;

        let file = File::create(path).map_err(|e| BakeError::FileSystem(path.to_path_buf(), e))?;
        let mut writer = BufWriter::new(file);
        match format {
            MeshFormat::Json => serde_json::to_writer_pretty(&mut writer, object)?,
            MeshFormat::Obj => object
                .write_obj(&mut writer)
                .map_err(|e| BakeError::FileSystem(path.to_path_buf(), e))?,
        }
        writer
            .flush()
            .map_err(|e| BakeError::FileSystem(path.to_path_buf(), e))?;

        log::debug!("Wrote {format:?} mesh asset {}", path.display());
        self.written.push(path.to_path_buf());
        Ok(())
    }

    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes).map_err(|e| BakeError::FileSystem(path.to_path_buf(), e))?;
        self.written.push(path.to_path_buf());
        Ok(())
    }
}
