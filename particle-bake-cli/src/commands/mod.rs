//! Command implementations

pub mod bake;
pub mod resolve;
