use thiserror::Error;

/// Error types for emitter configuration and simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A settings value is out of range
    #[error("Invalid emitter settings: {0}")]
    InvalidSettings(String),

    /// Simulation step must be finite and positive
    #[error("Invalid simulation step: {0}")]
    InvalidStep(f32),

    /// Simulation duration must be finite and non-negative
    #[error("Invalid simulation duration: {0}")]
    InvalidDuration(f32),
}

/// Result type using SimError
pub type Result<T> = std::result::Result<T, SimError>;
