//! Particle system and renderer collaborators

use glam::{Mat4, Vec3, Vec4};
use particle_sim::{Particle, ParticleEmitter};

use crate::camera::{BakeCamera, CameraView};
use crate::error::{BakeError, Result};
use crate::mesh::{BakeMeshOptions, Material, Mesh};
use crate::raster::Sprite;

/// A particle system that can be baked
pub trait ParticleSystem {
    /// Display name
    fn name(&self) -> &str;

    /// The renderer attached to this system, if any
    fn renderer(&self) -> Option<&dyn ParticleRenderer>;
}

/// Turns the live particles of a system into geometry
pub trait ParticleRenderer {
    /// Bake the current particles into a mesh
    ///
    /// Billboards face `camera` when one is given.
    fn bake_mesh(&self, camera: Option<&dyn BakeCamera>, options: BakeMeshOptions) -> Result<Mesh>;

    /// Material shared by everything this renderer draws
    fn shared_material(&self) -> Option<&Material>;
}

/// Draws each particle as a camera-facing square
#[derive(Debug, Clone, Default)]
pub struct BillboardRenderer {
    /// Material applied to every billboard
    pub material: Option<Material>,
}

impl BillboardRenderer {
    /// Renderer with the given material
    pub fn with_material(material: Material) -> Self {
        Self {
            material: Some(material),
        }
    }

    /// Build one quad per particle
    ///
    /// Without a view the quads lie in the local XY plane.
    pub fn bake(
        &self,
        particles: &[Particle],
        local_to_world: Mat4,
        view: Option<&CameraView>,
        options: BakeMeshOptions,
    ) -> Mesh {
        let (world_right, world_up, world_normal) = match view {
            Some(view) => (view.right(), view.screen_up(), -view.forward()),
            None => (Vec3::X, Vec3::Y, Vec3::Z),
        };
        let (scale, rotation, _) = local_to_world.to_scale_rotation_translation();

        // Local-space quads are counter-rotated so they face the camera once
        // the system transform is applied
        let (right, up, normal, size_factor) = match options {
            BakeMeshOptions::BakePosition => (world_right, world_up, world_normal, scale.x),
            BakeMeshOptions::Default => {
                let inverse = rotation.inverse();
                (inverse * world_right, inverse * world_up, inverse * world_normal, 1.0)
            }
        };

        let mut mesh = Mesh::new();
        mesh.positions.reserve(particles.len() * 4);
        for particle in particles.iter().filter(|p| p.is_alive()) {
            let center = match options {
                BakeMeshOptions::BakePosition => local_to_world.transform_point3(particle.position),
                BakeMeshOptions::Default => particle.position,
            };
            let half = particle.size * size_factor * 0.5;
            mesh.push_quad(center, right * half, up * half, normal, particle.color);
        }
        mesh
    }
}

/// A simulated emitter with an optional billboard renderer
#[derive(Debug, Clone)]
pub struct SimulatedParticleSystem {
    emitter: ParticleEmitter,
    renderer: Option<BillboardRenderer>,
}

impl SimulatedParticleSystem {
    /// Wrap an emitter with a default billboard renderer
    pub fn new(emitter: ParticleEmitter) -> Self {
        Self {
            emitter,
            renderer: Some(BillboardRenderer::default()),
        }
    }

    /// Wrap an emitter with no renderer
    pub fn without_renderer(emitter: ParticleEmitter) -> Self {
        Self {
            emitter,
            renderer: None,
        }
    }

    /// Replace the renderer
    #[must_use]
    pub fn with_renderer(mut self, renderer: BillboardRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// The underlying emitter
    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    /// Mutable access to the emitter, e.g. to keep simulating
    pub fn emitter_mut(&mut self) -> &mut ParticleEmitter {
        &mut self.emitter
    }

    /// World-space sprites for the live particles, tinted by the material
    pub fn sprites(&self) -> Vec<Sprite> {
        let local_to_world = self.emitter.local_to_world();
        let (scale, _, _) = local_to_world.to_scale_rotation_translation();
        let tint = self
            .renderer
            .as_ref()
            .and_then(|r| r.material.as_ref())
            .map_or(Vec4::ONE, |m| Vec4::from(m.color));

        self.emitter
            .particles()
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| Sprite {
                position: local_to_world.transform_point3(p.position),
                color: p.color * tint,
                size: p.size * scale.x,
            })
            .collect()
    }
}

impl ParticleSystem for SimulatedParticleSystem {
    fn name(&self) -> &str {
        self.emitter.name()
    }

    fn renderer(&self) -> Option<&dyn ParticleRenderer> {
        self.renderer.as_ref().map(|_| self as &dyn ParticleRenderer)
    }
}

impl ParticleRenderer for SimulatedParticleSystem {
    fn bake_mesh(&self, camera: Option<&dyn BakeCamera>, options: BakeMeshOptions) -> Result<Mesh> {
        let renderer = self
            .renderer
            .as_ref()
            .ok_or_else(|| BakeError::MissingRenderer(self.name().to_string()))?;
        let view = camera.map(|c| c.view());

        Ok(renderer.bake(
            self.emitter.particles(),
            self.emitter.local_to_world(),
            view.as_ref(),
            options,
        ))
    }

    fn shared_material(&self) -> Option<&Material> {
        self.renderer.as_ref().and_then(|r| r.material.as_ref())
    }
}
