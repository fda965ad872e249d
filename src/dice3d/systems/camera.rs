//! Camera control systems
//!
//! This module contains the damped orbit control used before the throw and
//! the camera director that scripts the launch fly-through and the follow
//! shot.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::dice3d::types::*;

/// Pixels per wheel line when the platform reports pixel scrolling.
const PIXELS_PER_LINE: f32 = 40.0;

/// Feed mouse drag, wheel and keyboard input into the orbit control
#[allow(clippy::too_many_arguments)]
pub fn orbit_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    time: Res<Time>,
    config: Res<SimulationConfig>,
    director: Res<CameraDirector>,
    mut orbit: ResMut<OrbitControl>,
) {
    if !director.is_idle() {
        return;
    }

    let settings = &config.camera.orbit;

    if mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        orbit.rotate(
            -mouse_motion.delta.x * settings.rotate_speed,
            -mouse_motion.delta.y * settings.rotate_speed,
        );
    }

    let lines = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
    };
    if lines != 0.0 {
        orbit.zoom(-lines * settings.zoom_speed);
    }

    let step = settings.key_rotate_speed * time.delta_secs();
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        orbit.rotate(step, 0.0);
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        orbit.rotate(-step, 0.0);
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        orbit.zoom(-step);
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        orbit.zoom(step);
    }
}

/// Advance the orbit damping and move the camera while no shot is scripted
pub fn update_orbit_camera(
    config: Res<SimulationConfig>,
    director: Res<CameraDirector>,
    mut orbit: ResMut<OrbitControl>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if !director.is_idle() {
        orbit.clear();
        return;
    }
    if !orbit.is_moving() {
        return;
    }

    let target = orbit.target;
    for mut transform in camera_query.iter_mut() {
        transform.translation = orbit.update(transform.translation, &config.camera.orbit);
        transform.look_at(target, Vec3::Y);
    }
}

/// Drive the camera from the director: launch fly-through, then follow the die
pub fn direct_camera(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut director: ResMut<CameraDirector>,
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<Die>)>,
    dice_query: Query<(&Transform, &Velocity), With<Die>>,
) {
    let was_following = director.is_following();
    let cue = director.advance(time.elapsed(), &config.camera.launch);
    if !was_following && director.is_following() {
        info!("Launch shot finished, camera follows the die");
    }

    match cue {
        CameraCue::Free => {}
        CameraCue::Launch { position, look_at } => {
            for mut transform in camera_query.iter_mut() {
                transform.translation = position;
                transform.look_at(look_at, Vec3::Y);
            }
        }
        CameraCue::Follow => {
            let Some((die_transform, velocity)) = dice_query.iter().next() else {
                return;
            };
            let die_position = die_transform.translation;
            let speed = velocity.linvel.length();

            for mut transform in camera_query.iter_mut() {
                if let Some(next) =
                    follow_step(transform.translation, die_position, speed, &config.camera.follow)
                {
                    transform.translation = next;
                    transform.look_at(die_position, Vec3::Y);
                }
            }
        }
    }
}
