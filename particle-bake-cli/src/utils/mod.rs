//! Shared utilities for the particle-bake CLI

pub mod format;

pub use format::*;
