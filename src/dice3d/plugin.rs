//! Plugins wiring the dice launch into a Bevy app
//!
//! `DiceLaunchPlugin` carries the throw, camera director and settle logic and
//! needs nothing but time and physics components, so it also runs headless.
//! `DiceScenePlugin` adds the rendered scene, the button and pointer input on
//! top of it.

use bevy::prelude::*;

use crate::dice3d::systems::*;
use crate::dice3d::throw_control::*;
use crate::dice3d::types::*;

/// Core throw / camera / settle logic
pub struct DiceLaunchPlugin;

impl Plugin for DiceLaunchPlugin {
    fn build(&self, app: &mut App) {
        // Resources inserted before the plugin (config file, seeded rng) win.
        app.init_resource::<SimulationConfig>()
            .init_resource::<ThrowRng>()
            .init_resource::<CameraDirector>()
            .init_resource::<OrbitControl>()
            .init_resource::<DeferredThrow>()
            .init_resource::<RollState>()
            .init_resource::<DiceResults>()
            .add_message::<ThrowRequested>()
            .add_systems(Startup, report_config_source)
            // Rapier steps in PostUpdate, so the director reads the previous step's pose.
            .add_systems(
                Update,
                (
                    begin_launch,
                    fire_scheduled_throw,
                    direct_camera,
                    check_die_settled,
                    refresh_face_labels,
                )
                    .chain(),
            );
    }
}

/// Rendered scene, throw button and orbit input
pub struct DiceScenePlugin;

impl Plugin for DiceScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup)
            // Rapier creates its default context during Startup.
            .add_systems(PostStartup, configure_physics)
            .add_systems(Update, handle_throw_button_click.before(begin_launch))
            .add_systems(
                Update,
                (orbit_input, update_orbit_camera)
                    .chain()
                    .before(begin_launch)
                    .before(direct_camera),
            );
    }
}
