//! Bake command implementation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use particle_bake::{
    BakeCamera, BakeConfig, BakeSettings, Baker, DEFAULT_IMAGE_PATH, DEFAULT_MESH_PATH,
    DEFAULT_TEXTURE_RESOLUTION,
};

use crate::scene::Scene;
use crate::utils::format_bytes;

/// Largest accepted `--resolution`
const MAX_RESOLUTION: u32 = 16384;

#[derive(Args)]
pub struct BakeArgs {
    /// Scene file (YAML or JSON)
    pub scene: PathBuf,

    /// Export a mesh (.asset, .json or .obj), optionally to the given path
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_MESH_PATH)]
    pub mesh: Option<PathBuf>,

    /// Export a PNG image through the scene camera, optionally to the given path
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_IMAGE_PATH)]
    pub image: Option<PathBuf>,

    /// Image width and height in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_TEXTURE_RESOLUTION,
        value_parser = clap::value_parser!(u32).range(1..=MAX_RESOLUTION as i64)
    )]
    pub resolution: u32,

    /// Keep mesh vertices in the emitter's local space
    #[arg(long)]
    pub no_transform: bool,

    /// Do not attach the scene material to the baked mesh
    #[arg(long)]
    pub no_material: bool,

    /// Override the simulated duration in seconds
    #[arg(long)]
    pub duration: Option<f32>,

    /// Override the simulation time step in seconds
    #[arg(long)]
    pub step: Option<f32>,
}

impl BakeArgs {
    fn settings(&self) -> BakeSettings {
        let defaults = BakeSettings::default();
        BakeSettings {
            use_transform: !self.no_transform,
            apply_material: !self.no_material,
            export_as_mesh: self.mesh.is_some(),
            export_as_image: self.image.is_some(),
            texture_resolution: self.resolution,
            mesh_save_path: self.mesh.clone().unwrap_or(defaults.mesh_save_path),
            image_save_path: self.image.clone().unwrap_or(defaults.image_save_path),
        }
    }
}

pub fn execute(args: BakeArgs) -> Result<()> {
    let mut scene = Scene::load(&args.scene)?;
    if let Some(duration) = args.duration {
        scene.simulation.duration = duration;
    }
    if let Some(step) = args.step {
        scene.simulation.step = step;
    }

    let system = scene.simulate()?;
    let mut camera = scene.camera_for(&system);

    let mut config = BakeConfig::new(args.settings()).with_particle_source(&system);
    if let Some(camera) = camera.as_mut() {
        config = config.with_camera(camera as &mut dyn BakeCamera);
    }

    let report = Baker::on_disk().bake(config);

    if report.nothing_selected {
        println!("Nothing to bake: pass --mesh and/or --image");
        return Ok(());
    }

    if let (Some(object), Some(path)) = (&report.object, &report.mesh_path) {
        println!(
            "Mesh:  {} ({} vertices, {} triangles, {})",
            path.display(),
            object.mesh.vertex_count(),
            object.mesh.triangle_count(),
            file_size(path)?
        );
    }
    if let Some(path) = &report.image_path {
        println!(
            "Image: {} ({}x{}, {})",
            path.display(),
            args.resolution,
            args.resolution,
            file_size(path)?
        );
    }

    if !report.is_success() {
        let errors: Vec<_> = report.errors().map(ToString::to_string).collect();
        anyhow::bail!("Failed to bake {}: {}", args.scene.display(), errors.join("; "));
    }

    Ok(())
}

fn file_size(path: &Path) -> Result<String> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;
    Ok(format_bytes(metadata.len()))
}
