//! Individual particle representation

use glam::{Vec3, Vec4};

/// A single particle, in the emitter's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current age in seconds
    pub age: f32,
    /// Total lifespan in seconds
    pub lifespan: f32,
    /// Current color (RGBA, 0.0-1.0)
    pub color: Vec4,
    /// Current edge length of the billboard
    pub size: f32,
    /// Local-space position
    pub position: Vec3,
    /// Velocity vector
    pub velocity: Vec3,
}

impl Particle {
    /// Create a new particle with initial position, velocity, and lifespan
    pub fn new(position: Vec3, velocity: Vec3, lifespan: f32) -> Self {
        Self {
            age: 0.0,
            lifespan,
            color: Vec4::ONE,
            size: 1.0,
            position,
            velocity,
        }
    }

    /// Check if the particle is still alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.age < self.lifespan
    }

    /// Get the age as a fraction of lifespan (0.0 to 1.0)
    #[inline]
    pub fn age_percent(&self) -> f32 {
        if self.lifespan > 0.0 {
            (self.age / self.lifespan).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Update particle physics
    ///
    /// # Arguments
    /// * `dt` - Delta time in seconds
    /// * `force` - Combined acceleration (wind + gravity)
    /// * `drag` - Drag coefficient (0.0 = no drag, 1.0 = full drag)
    pub fn update_physics(&mut self, dt: f32, force: Vec3, drag: f32) {
        self.velocity += force * dt;

        if drag > 0.0 {
            self.velocity *= (1.0 - drag).powf(dt);
        }

        self.position += self.velocity * dt;
    }
}
