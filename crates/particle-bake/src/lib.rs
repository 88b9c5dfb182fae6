//! Bake a particle system's current state into static assets.
//!
//! Two exports are supported:
//!
//! - **Mesh**: every live particle becomes a camera-facing quad in a
//!   [`BakedObject`], optionally carrying the renderer's material, saved as a
//!   JSON asset or a Wavefront OBJ file.
//! - **Image**: the [`BakeCamera`] renders one square frame on a transparent
//!   background, which is encoded as PNG.
//!
//! Output paths never overwrite: when the desired path is taken the
//! [`Baker`] picks `Name (1).ext`, `Name (2).ext` and so on.
//!
//! # Example
//!
//! ```no_run
//! use particle_bake::{BakeConfig, BakeSettings, Baker, SimulatedParticleSystem};
//! use particle_sim::{EmitterSettings, ParticleEmitter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut emitter = ParticleEmitter::new(EmitterSettings::default())?;
//! emitter.simulate(2.0, 1.0 / 60.0)?;
//! let system = SimulatedParticleSystem::new(emitter);
//!
//! let settings = BakeSettings {
//!     export_as_mesh: true,
//!     ..Default::default()
//! };
//! let report = Baker::on_disk().bake(BakeConfig::new(settings).with_particle_source(&system));
//! if let Some(err) = report.mesh_error {
//!     return Err(err.into());
//! }
//! println!("Saved {:?}", report.mesh_path);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod baker;
mod camera;
mod config;
mod encode;
pub mod error;
mod mesh;
mod raster;
mod system;

pub use asset::{AssetStore, FsAssetStore, MeshFormat};
pub use baker::{BakeReport, Baker};
pub use camera::{
    BakeCamera, CameraView, ClearMode, RenderState, RenderStateGuard, RenderTarget, TRANSPARENT,
};
pub use config::{
    BakeConfig, BakeSettings, DEFAULT_IMAGE_PATH, DEFAULT_MESH_PATH, DEFAULT_TEXTURE_RESOLUTION,
};
pub use encode::{ImageEncoder, PngEncoder};
pub use error::{BakeError, Result};
pub use mesh::{BAKED_OBJECT_NAME, BakeMeshOptions, BakedObject, Material, Mesh};
pub use raster::{SKY_COLOR, SoftwareCamera, Sprite};
pub use system::{BillboardRenderer, ParticleRenderer, ParticleSystem, SimulatedParticleSystem};

// Re-export the path helpers so callers need a single dependency
pub use bake_paths::{PathError, UniquePathResolver, unique_path};
