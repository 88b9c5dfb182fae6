//! Error types for baking and exporting

use std::path::PathBuf;

use bake_paths::PathError;
use particle_sim::SimError;
use thiserror::Error;

/// Errors that can occur while baking or saving
#[derive(Debug, Error)]
pub enum BakeError {
    /// Mesh baking was requested without a particle system
    #[error("Particle System is not assigned!")]
    MissingParticleSystem,

    /// The particle system has nothing that can bake a mesh
    #[error("No particle renderer found on '{0}'!")]
    MissingRenderer(String),

    /// Image export was requested without a camera
    #[error("Bake Camera is not assigned!")]
    MissingCamera,

    /// Mesh export path is empty
    #[error("Mesh save path is empty!")]
    EmptyMeshPath,

    /// Image export path is empty
    #[error("Image save path is empty!")]
    EmptyImagePath,

    /// Texture resolution must be at least one pixel
    #[error("Invalid texture resolution: {0}")]
    InvalidResolution(u32),

    /// The camera was asked to render without a target
    #[error("Camera has no render target")]
    NoRenderTarget,

    /// The asset extension does not map to a known mesh format
    #[error("Unsupported mesh format for {0:?}, expected .asset, .json or .obj")]
    UnsupportedMeshFormat(PathBuf),

    /// Writing an asset failed
    #[error("Failed to write {0:?}, due: {1}")]
    FileSystem(PathBuf, std::io::Error),

    /// Output path preparation failed
    #[error(transparent)]
    Path(#[from] PathError),

    /// Particle simulation failed
    #[error(transparent)]
    Simulation(#[from] SimError),

    /// Image encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Mesh serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using BakeError
pub type Result<T> = std::result::Result<T, BakeError>;
