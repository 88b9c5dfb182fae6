//! Scene files
//!
//! A scene describes one emitter, how long to simulate it, and optionally the
//! material and camera used for baking. YAML (`.yaml`, `.yml`) and JSON
//! (`.json`) are accepted:
//!
//! ```yaml
//! emitter:
//!   name: Sparks
//!   emission_rate: 40
//!   gravity: 2.5
//! simulation:
//!   duration: 3.0
//! camera:
//!   eye: [0, -10, 1]
//!   half_height: 4
//! material:
//!   name: Spark
//!   color: [1.0, 0.6, 0.2, 1.0]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use glam::Vec3;
use particle_bake::{
    BillboardRenderer, CameraView, Material, SimulatedParticleSystem, SoftwareCamera,
};
use particle_sim::{EmitterSettings, ParticleEmitter};
use serde::Deserialize;

/// Scene file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scene {
    /// Emitter to simulate
    pub emitter: EmitterSettings,
    /// Simulation time
    pub simulation: SimulationConfig,
    /// Camera used for billboards and image exports
    pub camera: Option<CameraConfig>,
    /// Material shared by the baked billboards
    pub material: Option<Material>,
}

/// How long to run the emitter before baking
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Total simulated seconds
    pub duration: f32,
    /// Fixed time step in seconds
    pub step: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: 2.0,
            step: 1.0 / 60.0,
        }
    }
}

/// Orthographic camera placement
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Half of the visible height in world units
    pub half_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let view = CameraView::default();
        Self {
            eye: view.eye.to_array(),
            target: view.target.to_array(),
            up: view.up.to_array(),
            half_height: 5.0,
        }
    }
}

impl CameraConfig {
    pub fn view(&self) -> CameraView {
        CameraView {
            eye: Vec3::from(self.eye),
            target: Vec3::from(self.target),
            up: Vec3::from(self.up),
        }
    }
}

impl Scene {
    /// Load a scene, picking the parser from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let scene = match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml_ng::from_str(&text)
                .with_context(|| format!("Invalid YAML scene: {}", path.display()))?,
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON scene: {}", path.display()))?,
            _ => bail!(
                "Unsupported scene format: {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        };
        Ok(scene)
    }

    /// Run the emitter for `simulation.duration` seconds
    pub fn simulate(&self) -> Result<SimulatedParticleSystem> {
        let mut emitter = ParticleEmitter::new(self.emitter.clone())
            .with_context(|| format!("Invalid emitter '{}'", self.emitter.name))?;
        emitter
            .simulate(self.simulation.duration, self.simulation.step)
            .context("Simulation failed")?;

        log::info!(
            "Simulated '{}' for {}s: {} live particles",
            emitter.name(),
            emitter.elapsed(),
            emitter.particle_count()
        );

        let renderer = BillboardRenderer {
            material: self.material.clone(),
        };
        Ok(SimulatedParticleSystem::new(emitter).with_renderer(renderer))
    }

    /// Camera looking at `system`, if the scene defines one
    pub fn camera_for(&self, system: &SimulatedParticleSystem) -> Option<SoftwareCamera> {
        self.camera.map(|config| {
            SoftwareCamera::new(config.view(), config.half_height).with_sprites(system.sprites())
        })
    }
}
