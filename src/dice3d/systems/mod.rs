//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the dice launch,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene and physics world initialization (camera, lights, floor, walls, die, button)
//! - `camera`: Orbit control and the scripted camera director
//! - `dice`: Settle detection, face result and label refresh

mod camera;
mod dice;
mod setup;

// Re-export all public systems
pub use camera::{direct_camera, orbit_input, update_orbit_camera};
pub use dice::{check_die_settled, refresh_face_labels, SETTLE_SECONDS};
pub use setup::{
    configure_physics, create_face_label_assets, report_config_source, setup, spawn_bounds, spawn_camera_and_lights,
    spawn_die, spot_light, wall_placements,
};
