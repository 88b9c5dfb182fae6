//! Spawn algorithms for the different emission shapes

use glam::Vec3;

use crate::particle::Particle;
use crate::settings::EmitterSettings;

/// Deterministic random number generator (LCG)
#[derive(Debug, Clone)]
pub struct ParticleRng {
    state: u64,
}

impl ParticleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { u64::from(seed) },
        }
    }

    /// Generate a random f32 in range [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        // 30 high bits
        let bits = ((self.state >> 33) as u32) & 0x3FFF_FFFF;
        bits as f32 / (0x4000_0000 as f32)
    }

    /// Generate a random f32 in range [-a, a]
    pub fn random_range(&mut self, a: f32) -> f32 {
        if a == 0.0 {
            return 0.0;
        }
        (self.next_f32() * 2.0 - 1.0) * a
    }
}

/// Spawn a particle at the origin, moving along +Z
pub(crate) fn create_point(settings: &EmitterSettings, rng: &mut ParticleRng) -> Particle {
    let speed = emission_speed(settings, rng);
    Particle::new(Vec3::ZERO, Vec3::new(0.0, 0.0, speed), lifespan(settings, rng))
}

/// Spawn a particle inside the emission rectangle
///
/// Velocity follows the polar/azimuth ranges, or points away from
/// `z_source` when that is set.
pub(crate) fn create_planar(settings: &EmitterSettings, rng: &mut ParticleRng) -> Particle {
    let position = Vec3::new(
        rng.random_range(1.0) * settings.area_length * 0.5,
        rng.random_range(1.0) * settings.area_width * 0.5,
        0.0,
    );

    let velocity = if settings.z_source.abs() < 0.001 {
        let polar = settings.vertical_range * rng.random_range(1.0);
        let azimuth = settings.horizontal_range * rng.random_range(1.0);
        let speed = emission_speed(settings, rng);
        Vec3::new(
            azimuth.cos() * polar.sin(),
            azimuth.sin() * polar.sin(),
            polar.cos(),
        ) * speed
    } else {
        away_from_source(position, settings, rng)
    };

    Particle::new(position, velocity, lifespan(settings, rng))
}

/// Spawn a particle on a spherical shell between `area_length` and
/// `area_width`
pub(crate) fn create_spherical(settings: &EmitterSettings, rng: &mut ParticleRng) -> Particle {
    let shell = settings.area_width - settings.area_length;
    let radius = settings.area_length + rng.next_f32() * shell;

    let polar = rng.random_range(1.0) * settings.vertical_range;
    let azimuth = rng.random_range(1.0) * settings.horizontal_range;
    let direction = Vec3::new(
        polar.cos() * azimuth.cos(),
        polar.cos() * azimuth.sin(),
        polar.sin(),
    );
    let position = direction * radius;

    let velocity = if settings.z_source.abs() < 0.001 {
        let speed = emission_speed(settings, rng);
        if settings.emit_upward {
            Vec3::new(0.0, 0.0, speed)
        } else {
            direction * speed
        }
    } else {
        away_from_source(position, settings, rng)
    };

    Particle::new(position, velocity, lifespan(settings, rng))
}

fn away_from_source(position: Vec3, settings: &EmitterSettings, rng: &mut ParticleRng) -> Vec3 {
    let offset = position - Vec3::new(0.0, 0.0, settings.z_source);
    if offset.length() > 0.0001 {
        offset.normalize() * emission_speed(settings, rng)
    } else {
        offset
    }
}

#[inline]
fn emission_speed(settings: &EmitterSettings, rng: &mut ParticleRng) -> f32 {
    settings.speed * (1.0 + rng.random_range(settings.speed_variation))
}

#[inline]
fn lifespan(settings: &EmitterSettings, rng: &mut ParticleRng) -> f32 {
    settings.lifespan + rng.random_range(settings.lifespan_variance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_particle_rng() {
        let mut rng = ParticleRng::new(12345);
        let v1 = rng.next_f32();
        let v2 = rng.next_f32();

        assert!((0.0..1.0).contains(&v1));
        assert!((0.0..1.0).contains(&v2));
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_rng_is_reproducible() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_random_range() {
        let mut rng = ParticleRng::new(12345);

        for _ in 0..100 {
            let v = rng.random_range(5.0);
            assert!((-5.0..=5.0).contains(&v));
        }

        assert_eq!(rng.random_range(0.0), 0.0);
    }

    #[test]
    fn test_create_point() {
        let mut rng = ParticleRng::new(1);
        let settings = EmitterSettings {
            speed: 2.0,
            ..Default::default()
        };
        let p = create_point(&settings, &mut rng);
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.velocity, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_create_planar() {
        let mut rng = ParticleRng::new(42);
        let settings = EmitterSettings {
            area_length: 2.0,
            area_width: 2.0,
            ..Default::default()
        };

        for _ in 0..50 {
            let p = create_planar(&settings, &mut rng);
            assert!(p.position.x.abs() <= 1.0);
            assert!(p.position.y.abs() <= 1.0);
            assert_eq!(p.position.z, 0.0);
            assert!(p.is_alive());
        }
    }

    #[test]
    fn test_create_spherical() {
        let mut rng = ParticleRng::new(42);
        let settings = EmitterSettings {
            area_length: 1.0,
            area_width: 2.0,
            vertical_range: PI,
            horizontal_range: PI * 2.0,
            ..Default::default()
        };

        for _ in 0..50 {
            let p = create_spherical(&settings, &mut rng);
            let dist = p.position.length();
            assert!((0.99..=2.01).contains(&dist));
        }
    }

    #[test]
    fn test_spherical_upward() {
        let mut rng = ParticleRng::new(42);
        let settings = EmitterSettings {
            area_length: 1.0,
            area_width: 1.0,
            vertical_range: PI,
            horizontal_range: PI,
            emit_upward: true,
            ..Default::default()
        };
        let p = create_spherical(&settings, &mut rng);
        assert_eq!(p.velocity.x, 0.0);
        assert_eq!(p.velocity.y, 0.0);
        assert!(p.velocity.z > 0.0);
    }
}
