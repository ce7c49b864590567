// Domain layer - Core simulation logic
pub mod domain;

// Application layer - Driver-facing simulation state
pub mod application;

// Re-exports for convenience
pub use application::Simulation;
pub use domain::{Cell, GridError, LifeGrid, Pattern, presets};
