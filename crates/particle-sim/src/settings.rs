//! Emitter configuration

use glam::{Mat4, Quat, Vec3};

use crate::error::{Result, SimError};

/// Upper bound on live particles per emitter
pub const MAX_PARTICLES: usize = 1_000_000;

/// Shape particles are spawned from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EmissionShape {
    /// Particles spawn at the origin
    #[default]
    Point,
    /// Particles spawn within a rectangle on the XY plane
    Planar,
    /// Particles spawn on a spherical shell
    Spherical,
}

/// Placement of the emitter in world space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Transform {
    /// World-space position
    pub position: [f32; 3],
    /// Rotation about the Z axis, in degrees
    pub rotation_z: f32,
    /// Uniform scale
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation_z: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Local-to-world matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_z(self.rotation_z.to_radians()),
            Vec3::from(self.position),
        )
    }
}

/// Full description of an emitter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmitterSettings {
    /// Display name
    pub name: String,
    /// Spawn shape
    pub shape: EmissionShape,
    /// Particles emitted per second
    pub emission_rate: f32,
    /// Particle lifespan in seconds
    pub lifespan: f32,
    /// Random lifespan variance (+/-)
    pub lifespan_variance: f32,
    /// Initial speed
    pub speed: f32,
    /// Relative speed variation (0.1 = +/-10%)
    pub speed_variation: f32,
    /// Vertical emission angle range (radians)
    pub vertical_range: f32,
    /// Horizontal emission angle range (radians)
    pub horizontal_range: f32,
    /// Emission area length (planar), or inner radius (spherical)
    pub area_length: f32,
    /// Emission area width (planar), or outer radius (spherical)
    pub area_width: f32,
    /// Height of the point particles are emitted away from (0 = disabled)
    pub z_source: f32,
    /// Spherical particles move straight up instead of radially
    pub emit_upward: bool,
    /// Downward acceleration
    pub gravity: f32,
    /// Drag coefficient (0.0 = none, 1.0 = full)
    pub drag: f32,
    /// Constant wind acceleration
    pub wind: [f32; 3],
    /// Color at birth (RGBA, 0.0-1.0)
    pub start_color: [f32; 4],
    /// Color at death (RGBA, 0.0-1.0)
    pub end_color: [f32; 4],
    /// Size at birth
    pub start_size: f32,
    /// Size at death
    pub end_size: f32,
    /// Particle cap; derived from rate and lifespan when unset
    pub max_particles: Option<usize>,
    /// Random seed
    pub seed: u32,
    /// Emitter placement
    pub transform: Transform,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            name: "Particle System".to_string(),
            shape: EmissionShape::Point,
            emission_rate: 10.0,
            lifespan: 5.0,
            lifespan_variance: 0.0,
            speed: 1.0,
            speed_variation: 0.0,
            vertical_range: 0.0,
            horizontal_range: 0.0,
            area_length: 1.0,
            area_width: 1.0,
            z_source: 0.0,
            emit_upward: false,
            gravity: 0.0,
            drag: 0.0,
            wind: [0.0, 0.0, 0.0],
            start_color: [1.0, 1.0, 1.0, 1.0],
            end_color: [1.0, 1.0, 1.0, 1.0],
            start_size: 0.25,
            end_size: 0.25,
            max_particles: None,
            seed: 42,
            transform: Transform::default(),
        }
    }
}

impl EmitterSettings {
    /// Check that every value is in range
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(SimError::InvalidSettings(message));

        if !self.emission_rate.is_finite() || self.emission_rate < 0.0 {
            return invalid(format!(
                "emission_rate must be >= 0, got {}",
                self.emission_rate
            ));
        }
        if !self.lifespan.is_finite() || self.lifespan <= 0.0 {
            return invalid(format!("lifespan must be > 0, got {}", self.lifespan));
        }
        if !self.lifespan_variance.is_finite() || self.lifespan_variance < 0.0 {
            return invalid(format!(
                "lifespan_variance must be >= 0, got {}",
                self.lifespan_variance
            ));
        }
        if self.start_size < 0.0 || self.end_size < 0.0 {
            return invalid(format!(
                "sizes must be >= 0, got {} and {}",
                self.start_size, self.end_size
            ));
        }
        if !(0.0..=1.0).contains(&self.drag) {
            return invalid(format!("drag must be within 0..=1, got {}", self.drag));
        }
        match self.max_particles {
            Some(0) => return invalid("max_particles must be at least 1".to_string()),
            Some(cap) if cap > MAX_PARTICLES => {
                return invalid(format!(
                    "max_particles must be at most {MAX_PARTICLES}, got {cap}"
                ));
            }
            Some(_) => {}
            None => {
                let derived = self.derived_capacity();
                if derived > MAX_PARTICLES as f64 {
                    return invalid(format!(
                        "emission_rate {} with lifespan {} needs {derived:.0} particles, \
                         more than {MAX_PARTICLES}; lower the rate or set max_particles",
                        self.emission_rate,
                        self.lifespan + self.lifespan_variance
                    ));
                }
            }
        }
        if self.transform.scale <= 0.0 {
            return invalid(format!(
                "transform scale must be > 0, got {}",
                self.transform.scale
            ));
        }
        Ok(())
    }

    /// Particle cap, either explicit or derived from the longest possible
    /// lifetime at the configured rate
    ///
    /// Never exceeds [`MAX_PARTICLES`].
    pub fn particle_capacity(&self) -> usize {
        let capacity = self.max_particles.unwrap_or_else(|| {
            let derived = self.derived_capacity().min(MAX_PARTICLES as f64);
            (derived as usize).max(16)
        });
        capacity.min(MAX_PARTICLES)
    }

    fn derived_capacity(&self) -> f64 {
        let max_lifespan = f64::from(self.lifespan) + f64::from(self.lifespan_variance);
        max_lifespan * f64::from(self.emission_rate) * 1.5
    }
}
