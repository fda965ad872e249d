//! Throw Control Systems
//!
//! Contains systems for turning the button click into a throw request,
//! starting the launch shot and firing the deferred throw.

use super::state::*;
use bevy::prelude::*;
use bevy_material_ui::prelude::{ButtonClickEvent, MaterialButton};
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::*;

/// Disable and hide the throw button on its first click and request the throw.
pub fn handle_throw_button_click(
    mut click_events: MessageReader<ButtonClickEvent>,
    mut buttons: Query<(&mut MaterialButton, &mut Node), With<ThrowButton>>,
    mut requests: MessageWriter<ThrowRequested>,
) {
    for event in click_events.read() {
        let Ok((mut button, mut node)) = buttons.get_mut(event.entity) else {
            continue;
        };
        if button.disabled {
            continue;
        }

        button.disabled = true;
        node.display = Display::None;
        requests.write(ThrowRequested);
    }
}

/// Start the launch shot and schedule the throw. Only the first request counts.
pub fn begin_launch(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut requests: MessageReader<ThrowRequested>,
    mut director: ResMut<CameraDirector>,
    mut deferred: ResMut<DeferredThrow>,
    mut orbit: ResMut<OrbitControl>,
) {
    for _ in requests.read() {
        let now = time.elapsed();
        if director.begin_launch(now) {
            deferred.schedule(now, config.throw.delay());
            orbit.clear();
            info!(
                "Launch started at {:.3}s, throw due in {} ms",
                now.as_secs_f32(),
                config.throw.delay_ms
            );
        } else {
            debug!("Ignoring throw request: the die was already launched");
        }
    }
}

/// Throw the die once the deferred throw is due.
#[allow(clippy::too_many_arguments)]
pub fn fire_scheduled_throw(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut deferred: ResMut<DeferredThrow>,
    mut rng: ResMut<ThrowRng>,
    mut roll_state: ResMut<RollState>,
    mut dice_results: ResMut<DiceResults>,
    mut dice_query: Query<(Entity, &mut Transform, &mut Velocity, &mut Visibility), With<Die>>,
) {
    if !deferred.take_if_due(time.elapsed()) {
        return;
    }

    for (entity, mut transform, mut velocity, mut visibility) in dice_query.iter_mut() {
        let params = sample_throw(&config.throw, &mut rng.0);

        transform.translation = params.position;
        transform.rotation = params.rotation;
        velocity.linvel = params.linvel;
        velocity.angvel = params.angvel;
        *visibility = Visibility::Visible;
        commands.entity(entity).remove::<RigidBodyDisabled>();

        info!(
            "Die thrown from {:?} with linvel {:?}, angvel {:?}",
            params.position, params.linvel, params.angvel
        );
    }

    roll_state.rolling = true;
    roll_state.settle_timer = 0.0;
    roll_state.intended_value = config.throw.forced_value;
    dice_results.value = None;
    dice_results.relabelled = false;
}
