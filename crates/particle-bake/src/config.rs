//! Bake configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::camera::BakeCamera;
use crate::mesh::BakeMeshOptions;
use crate::system::ParticleSystem;

/// Default image output path
pub const DEFAULT_IMAGE_PATH: &str = "Assets/BakedParticleTexture.png";

/// Default mesh output path
pub const DEFAULT_MESH_PATH: &str = "Assets/BakedParticleMesh.asset";

/// Default square texture size in pixels
pub const DEFAULT_TEXTURE_RESOLUTION: u32 = 1024;

/// Plain bake options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeSettings {
    /// Bake vertices in world space instead of the system's local space
    pub use_transform: bool,
    /// Attach the renderer's material to the baked object
    pub apply_material: bool,
    /// Render and save an image through the camera
    pub export_as_image: bool,
    /// Bake and save a mesh
    pub export_as_mesh: bool,
    /// Edge length of the square image, in pixels
    pub texture_resolution: u32,
    /// Desired image path, disambiguated before writing
    pub image_save_path: PathBuf,
    /// Desired mesh path, disambiguated before writing
    pub mesh_save_path: PathBuf,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            use_transform: true,
            apply_material: true,
            export_as_image: false,
            export_as_mesh: false,
            texture_resolution: DEFAULT_TEXTURE_RESOLUTION,
            image_save_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            mesh_save_path: PathBuf::from(DEFAULT_MESH_PATH),
        }
    }
}

impl BakeSettings {
    /// Mesh baking options implied by `use_transform`
    pub fn mesh_options(&self) -> BakeMeshOptions {
        BakeMeshOptions::from_use_transform(self.use_transform)
    }

    /// Whether at least one export is selected
    pub fn has_export(&self) -> bool {
        self.export_as_mesh || self.export_as_image
    }
}

/// Everything a bake needs: the particle source, the camera and the options
///
/// Both collaborators are optional here; each export checks for the one it
/// needs.
#[derive(Default)]
pub struct BakeConfig<'a> {
    /// Particle system to bake a mesh from
    pub particle_source: Option<&'a dyn ParticleSystem>,
    /// Camera used to orient billboards and to render images
    pub camera: Option<&'a mut dyn BakeCamera>,
    /// Options
    pub settings: BakeSettings,
}

impl<'a> BakeConfig<'a> {
    /// Configuration with no collaborators
    pub fn new(settings: BakeSettings) -> Self {
        Self {
            particle_source: None,
            camera: None,
            settings,
        }
    }

    /// Set the particle source
    #[must_use]
    pub fn with_particle_source(mut self, source: &'a dyn ParticleSystem) -> Self {
        self.particle_source = Some(source);
        self
    }

    /// Set the camera
    #[must_use]
    pub fn with_camera(mut self, camera: &'a mut dyn BakeCamera) -> Self {
        self.camera = Some(camera);
        self
    }
}
