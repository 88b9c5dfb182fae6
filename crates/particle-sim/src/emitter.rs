//! Particle emitter runtime state

use glam::{Mat4, Vec3, Vec4};

use crate::emission::{ParticleRng, create_planar, create_point, create_spherical};
use crate::error::{Result, SimError};
use crate::particle::Particle;
use crate::settings::{EmissionShape, EmitterSettings};

/// Particles reserved up front; larger caps grow on demand
const INITIAL_RESERVE: usize = 1024;

/// Runtime particle emitter
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    settings: EmitterSettings,
    particles: Vec<Particle>,
    rng: ParticleRng,
    /// Fractional particles to emit (accumulated)
    particles_to_emit: f32,
    max_particles: usize,
    /// Total simulated time in seconds
    elapsed: f32,
}

impl ParticleEmitter {
    /// Create an emitter with no live particles
    pub fn new(settings: EmitterSettings) -> Result<Self> {
        settings.validate()?;

        let max_particles = settings.particle_capacity();
        log::debug!(
            "Created emitter '{}' ({:?}, cap {max_particles})",
            settings.name,
            settings.shape
        );

        Ok(Self {
            rng: ParticleRng::new(settings.seed),
            particles: Vec::with_capacity(max_particles.min(INITIAL_RESERVE)),
            particles_to_emit: 0.0,
            max_particles,
            elapsed: 0.0,
            settings,
        })
    }

    /// Settings this emitter was built from
    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Live particles, in local space
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Get the current number of particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Get the maximum number of particles
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Total simulated time in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Local-to-world matrix of the emitter
    pub fn local_to_world(&self) -> Mat4 {
        self.settings.transform.matrix()
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;

        let rate = self.settings.emission_rate
            + self
                .rng
                .random_range(self.settings.emission_rate * 0.1);
        self.particles_to_emit += rate * dt;

        while self.particles_to_emit >= 1.0 && self.particles.len() < self.max_particles {
            let particle = self.create_particle();
            self.particles.push(particle);
            self.particles_to_emit -= 1.0;
        }
        // Anything that did not fit is dropped, not queued
        if self.particles.len() >= self.max_particles {
            self.particles_to_emit = self.particles_to_emit.min(1.0);
        }

        let force = Vec3::from(self.settings.wind) - Vec3::new(0.0, 0.0, self.settings.gravity);
        let drag = self.settings.drag;
        let start_color = Vec4::from(self.settings.start_color);
        let end_color = Vec4::from(self.settings.end_color);
        let (start_size, end_size) = (self.settings.start_size, self.settings.end_size);

        self.particles.retain_mut(|particle| {
            particle.age += dt;
            if !particle.is_alive() {
                return false;
            }

            particle.update_physics(dt, force, drag);

            let t = particle.age_percent();
            particle.color = start_color.lerp(end_color, t);
            particle.size = start_size + (end_size - start_size) * t;

            true
        });
    }

    /// Run fixed `step`-second updates covering `duration` seconds
    ///
    /// A final partial step covers any remainder.
    pub fn simulate(&mut self, duration: f32, step: f32) -> Result<()> {
        if !step.is_finite() || step <= 0.0 {
            return Err(SimError::InvalidStep(step));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(SimError::InvalidDuration(duration));
        }

        let full_steps = (duration / step).floor() as u64;
        for _ in 0..full_steps {
            self.update(step);
        }

        let remainder = duration - full_steps as f32 * step;
        if remainder > f32::EPSILON {
            self.update(remainder);
        }

        log::debug!(
            "Simulated '{}' for {duration}s: {} live particles",
            self.settings.name,
            self.particles.len()
        );
        Ok(())
    }

    fn create_particle(&mut self) -> Particle {
        let mut particle = match self.settings.shape {
            EmissionShape::Point => create_point(&self.settings, &mut self.rng),
            EmissionShape::Planar => create_planar(&self.settings, &mut self.rng),
            EmissionShape::Spherical => create_spherical(&self.settings, &mut self.rng),
        };
        particle.color = Vec4::from(self.settings.start_color);
        particle.size = self.settings.start_size;
        particle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn emitter(settings: EmitterSettings) -> ParticleEmitter {
        ParticleEmitter::new(settings).unwrap()
    }

    #[test]
    fn test_new_emitter_is_empty() {
        let e = emitter(EmitterSettings::default());
        assert_eq!(e.particle_count(), 0);
        assert_eq!(e.elapsed(), 0.0);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let err = ParticleEmitter::new(EmitterSettings {
            lifespan: -1.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidSettings(_)));
    }

    #[test]
    fn test_emission_accumulates() {
        let mut e = emitter(EmitterSettings {
            emission_rate: 100.0,
            ..Default::default()
        });
        e.simulate(1.0, 0.01).unwrap();

        // +/-10% rate jitter
        assert!((85..=115).contains(&e.particle_count()), "{}", e.particle_count());
    }

    #[test]
    fn test_particle_cap() {
        let mut e = emitter(EmitterSettings {
            emission_rate: 1000.0,
            max_particles: Some(20),
            ..Default::default()
        });
        e.simulate(2.0, 0.05).unwrap();
        assert_eq!(e.particle_count(), 20);
    }

    #[test]
    fn test_oversized_emitter_is_rejected() {
        let err = ParticleEmitter::new(EmitterSettings {
            emission_rate: 1.0e20,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidSettings(_)));
    }

    #[test]
    fn test_huge_rate_with_explicit_cap() {
        let mut e = emitter(EmitterSettings {
            emission_rate: 1.0e20,
            max_particles: Some(100),
            ..Default::default()
        });
        assert_eq!(e.max_particles(), 100);
        e.simulate(0.5, 0.1).unwrap();
        assert_eq!(e.particle_count(), 100);
    }

    #[test]
    fn test_particles_expire() {
        let mut e = emitter(EmitterSettings {
            emission_rate: 50.0,
            lifespan: 0.5,
            ..Default::default()
        });
        e.simulate(1.0, 0.01).unwrap();
        assert!(e.particles().iter().all(|p| p.age < 0.5));
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut e = emitter(EmitterSettings {
            emission_rate: 20.0,
            speed: 0.0,
            gravity: 9.8,
            ..Default::default()
        });
        e.simulate(1.0, 0.01).unwrap();
        assert!(e.particles().iter().all(|p| p.position.z <= 0.0));
    }

    #[test]
    fn test_color_and_size_follow_age() {
        let mut e = emitter(EmitterSettings {
            emission_rate: 20.0,
            lifespan: 2.0,
            start_color: [1.0, 0.0, 0.0, 1.0],
            end_color: [0.0, 0.0, 1.0, 0.0],
            start_size: 1.0,
            end_size: 0.0,
            ..Default::default()
        });
        e.simulate(1.5, 0.01).unwrap();

        let oldest = e
            .particles()
            .iter()
            .max_by(|a, b| a.age.total_cmp(&b.age))
            .unwrap();
        assert!(oldest.color.x < 0.5);
        assert!(oldest.color.z > 0.5);
        assert!(oldest.size < 0.5);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let settings = EmitterSettings {
            shape: EmissionShape::Spherical,
            emission_rate: 40.0,
            vertical_range: 1.0,
            horizontal_range: 3.0,
            speed_variation: 0.3,
            ..Default::default()
        };
        let mut a = emitter(settings.clone());
        let mut b = emitter(settings);
        a.simulate(2.0, 1.0 / 60.0).unwrap();
        b.simulate(2.0, 1.0 / 60.0).unwrap();
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_simulate_rejects_bad_step() {
        let mut e = emitter(EmitterSettings::default());
        assert_eq!(e.simulate(1.0, 0.0), Err(SimError::InvalidStep(0.0)));
        assert_eq!(e.simulate(-1.0, 0.1), Err(SimError::InvalidDuration(-1.0)));
    }

    #[test]
    fn test_simulate_covers_remainder() {
        let mut e = emitter(EmitterSettings::default());
        e.simulate(1.05, 0.1).unwrap();
        assert!((e.elapsed() - 1.05).abs() < 1e-4);
    }
}
