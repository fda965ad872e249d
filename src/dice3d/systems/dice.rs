//! Die state and result systems
//!
//! This module contains systems for checking whether the die has settled,
//! reading the face that ended up on top, and keeping the face labels in
//! sync with the die's face values.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::*;

/// Seconds the die must stay below the settle speed before it counts as resting.
pub const SETTLE_SECONDS: f32 = 0.5;

/// System to check if the die has settled and determine the result
pub fn check_die_settled(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut roll_state: ResMut<RollState>,
    mut dice_results: ResMut<DiceResults>,
    mut dice_query: Query<(&mut Die, &Velocity, &Transform)>,
) {
    if !roll_state.rolling {
        return;
    }

    let threshold = config.camera.follow.settle_speed;
    let all_settled = dice_query
        .iter()
        .all(|(_, vel, _)| vel.linvel.length() < threshold && vel.angvel.length() < threshold);

    if !all_settled {
        roll_state.settle_timer = 0.0;
        return;
    }

    roll_state.settle_timer += time.delta_secs();
    if roll_state.settle_timer <= SETTLE_SECONDS {
        return;
    }

    roll_state.rolling = false;
    roll_state.settle_timer = 0.0;

    for (mut die, _, transform) in dice_query.iter_mut() {
        let Some(face_up) = die.face_up(transform.rotation) else {
            continue;
        };
        let natural = die.faces[face_up].value;

        let relabelled = match roll_state.intended_value {
            Some(value) => die.force_face_value(face_up, value),
            None => false,
        };
        let value = die.faces[face_up].value;

        dice_results.value = Some(value);
        dice_results.relabelled = relabelled;

        if relabelled {
            info!("Die settled on face {natural}, relabelled to show {value}");
        } else {
            info!("Die settled showing {value}");
        }
    }
}

/// Point every face label at the mesh for its face's current value
pub fn refresh_face_labels(
    assets: Option<Res<FaceLabelAssets>>,
    dice_query: Query<&Die, Changed<Die>>,
    mut label_query: Query<(&FaceLabel, &ChildOf, &mut Mesh3d)>,
) {
    let Some(assets) = assets else {
        return;
    };

    for (label, child_of, mut mesh) in label_query.iter_mut() {
        let Ok(die) = dice_query.get(child_of.parent()) else {
            continue;
        };
        let Some(face) = die.faces.get(label.face) else {
            continue;
        };
        if let Some(handle) = assets.meshes_by_value.get(&face.value) {
            if mesh.0 != *handle {
                mesh.0 = handle.clone();
            }
        }
    }
}
