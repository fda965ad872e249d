//! Type definitions for the Dice Launch simulation
//!
//! This module is organized into submodules:
//! - `dice` - Die component, faces, results and roll state
//! - `camera` - Camera marker, camera director and orbit control
//! - `settings` - Simulation settings and persistence

pub mod camera;
pub mod dice;
pub mod settings;

// Re-export all public types for convenient access
pub use camera::*;
pub use dice::*;
pub use settings::*;
