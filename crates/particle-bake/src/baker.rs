//! Bake orchestration
//!
//! A [`Baker`] wires the collaborators together: a filesystem for path
//! checks, an [`AssetStore`] for writing results and an [`ImageEncoder`] for
//! rendered frames. Every output path goes through
//! [`UniquePathResolver`] so an existing asset is never overwritten.

use std::path::{Path, PathBuf};

use bake_paths::{FileSystem, StdFileSystem, UniquePathResolver, ensure_directory_exists};

use crate::asset::{AssetStore, FsAssetStore};
use crate::camera::{BakeCamera, RenderState, RenderStateGuard};
use crate::config::{BakeConfig, BakeSettings};
use crate::encode::{ImageEncoder, PngEncoder};
use crate::error::{BakeError, Result};
use crate::mesh::BakedObject;
use crate::system::ParticleSystem;

/// What a bake produced
///
/// A failed export does not stop the other one, so a report can carry a
/// saved image next to a mesh error.
#[derive(Debug, Default)]
pub struct BakeReport {
    /// The baked mesh object, when a mesh export ran
    pub object: Option<BakedObject>,
    /// Where the mesh was saved
    pub mesh_path: Option<PathBuf>,
    /// Where the image was saved
    pub image_path: Option<PathBuf>,
    /// Why the mesh export failed
    pub mesh_error: Option<BakeError>,
    /// Why the image export failed
    pub image_error: Option<BakeError>,
    /// Neither export was selected
    pub nothing_selected: bool,
}

impl BakeReport {
    /// Every selected export succeeded
    pub fn is_success(&self) -> bool {
        self.mesh_error.is_none() && self.image_error.is_none()
    }

    /// Export failures, mesh first
    pub fn errors(&self) -> impl Iterator<Item = &BakeError> {
        self.mesh_error.iter().chain(&self.image_error)
    }
}

/// Bakes particle systems into assets
#[derive(Debug)]
pub struct Baker<F, S, E> {
    resolver: UniquePathResolver<F>,
    store: S,
    encoder: E,
}

impl Baker<StdFileSystem, FsAssetStore, PngEncoder> {
    /// Baker writing PNG images and mesh files to the real filesystem
    pub fn on_disk() -> Self {
        Self::new(StdFileSystem, FsAssetStore::new(), PngEncoder)
    }
}

impl<F, S, E> Baker<F, S, E>
where
    F: FileSystem,
    S: AssetStore,
    E: ImageEncoder,
{
    /// Create a baker from its collaborators
    pub fn new(fs: F, store: S, encoder: E) -> Self {
        Self {
            resolver: UniquePathResolver::new(fs),
            store,
            encoder,
        }
    }

    /// The asset store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the baker, returning the asset store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Run the exports selected in `config`
    ///
    /// The mesh export runs before the image export. Each failure is logged
    /// and recorded in the report, and the remaining export still runs.
    pub fn bake(&mut self, config: BakeConfig<'_>) -> BakeReport {
        let BakeConfig {
            particle_source,
            camera,
            settings,
        } = config;

        let mut report = BakeReport::default();
        if !settings.has_export() {
            log::warn!("There is no selected option.");
            report.nothing_selected = true;
            return report;
        }

        if settings.export_as_mesh {
            match self.bake_mesh(particle_source, camera.as_deref(), &settings) {
                Ok((object, path)) => {
                    report.object = Some(object);
                    report.mesh_path = Some(path);
                }
                Err(e) => {
                    log::error!("{e}");
                    report.mesh_error = Some(e);
                }
            }
        }

        if settings.export_as_image {
            match self.export_image(camera, &settings) {
                Ok(path) => report.image_path = Some(path),
                Err(e) => {
                    log::error!("{e}");
                    report.image_error = Some(e);
                }
            }
        }

        report
    }

    /// Bake the source's live particles into a mesh and save it
    ///
    /// Returns the baked object together with the path it was saved at.
    pub fn bake_mesh(
        &mut self,
        source: Option<&dyn ParticleSystem>,
        camera: Option<&dyn BakeCamera>,
        settings: &BakeSettings,
    ) -> Result<(BakedObject, PathBuf)> {
        let source = source.ok_or(BakeError::MissingParticleSystem)?;
        let renderer = source
            .renderer()
            .ok_or_else(|| BakeError::MissingRenderer(source.name().to_string()))?;

        let mesh = renderer.bake_mesh(camera, settings.mesh_options())?;
        log::debug!(
            "Baked {} vertices from '{}' ({:?})",
            mesh.vertex_count(),
            source.name(),
            settings.mesh_options()
        );

        let mut object = BakedObject::new(mesh);
        if settings.apply_material {
            object.material = renderer.shared_material().cloned();
        }

        let path = self.export_mesh_asset(&object, &settings.mesh_save_path)?;
        log::info!("Particle mesh successfully baked!");
        Ok((object, path))
    }

    /// Save `object` at a free path derived from `path`
    pub fn export_mesh_asset(&mut self, object: &BakedObject, path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(BakeError::EmptyMeshPath);
        }
        if !self.store.supports_mesh(path) {
            return Err(BakeError::UnsupportedMeshFormat(path.to_path_buf()));
        }

        self.prepare_directory(path)?;
        let unique = self.resolver.resolve(path)?;
        self.store.save_mesh(object, &unique)?;

        log::info!("Mesh saved to: {}", unique.display());
        Ok(unique)
    }

    /// Render a square frame through `camera` and save it as an image
    ///
    /// The camera's render state is overridden for the capture and restored
    /// afterwards on every exit path.
    pub fn export_image(
        &mut self,
        camera: Option<&mut dyn BakeCamera>,
        settings: &BakeSettings,
    ) -> Result<PathBuf> {
        let camera = camera.ok_or(BakeError::MissingCamera)?;
        let resolution = settings.texture_resolution;
        if resolution == 0 {
            return Err(BakeError::InvalidResolution(resolution));
        }
        let path = settings.image_save_path.as_path();
        if path.as_os_str().is_empty() {
            return Err(BakeError::EmptyImagePath);
        }

        let mut camera = RenderStateGuard::acquire(camera);

        self.prepare_directory(path)?;
        let unique = self.resolver.resolve(path)?;

        camera.set_render_state(RenderState::for_bake(resolution));
        let image = camera.render()?;
        let bytes = self.encoder.encode(&image)?;
        self.store.write_bytes(&unique, &bytes)?;

        log::info!("Texture saved to: {}", unique.display());
        Ok(unique)
    }

    fn prepare_directory(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or(Path::new(""));
        ensure_directory_exists(self.resolver.filesystem(), dir)?;
        Ok(())
    }
}
