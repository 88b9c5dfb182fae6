//! CPU particle simulation
//!
//! This crate runs a single particle emitter forward in time so that its
//! state at a given moment can be baked into a mesh or an image. Simulation is
//! fully deterministic: the same [`EmitterSettings`] (including the seed),
//! simulated for the same duration and step, always yield the same particles.
//!
//! # Architecture
//!
//! - [`EmitterSettings`]: serializable description of an emitter
//! - [`ParticleEmitter`]: runtime state, advanced with [`ParticleEmitter::update`]
//!   or [`ParticleEmitter::simulate`]
//! - [`Particle`]: one live particle in the emitter's local space
//!
//! The simulation is Z-up: gravity pulls towards -Z and point/planar emitters
//! fire along +Z.
//!
//! # Usage
//!
//! ```
//! use particle_sim::{EmitterSettings, ParticleEmitter};
//!
//! let settings = EmitterSettings {
//!     emission_rate: 50.0,
//!     ..Default::default()
//! };
//! let mut emitter = ParticleEmitter::new(settings).unwrap();
//! emitter.simulate(1.0, 1.0 / 60.0).unwrap();
//! assert!(emitter.particle_count() > 0);
//! ```

#![forbid(unsafe_code)]

mod emission;
mod emitter;
pub mod error;
mod particle;
pub mod settings;

pub use emission::ParticleRng;
pub use emitter::ParticleEmitter;
pub use error::{Result, SimError};
pub use particle::Particle;
pub use settings::{EmissionShape, EmitterSettings, MAX_PARTICLES, Transform};
