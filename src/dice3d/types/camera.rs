//! Camera-related types and components
//!
//! This module contains the main camera marker, the scripted camera director
//! and the damped orbit control used while no shot is scripted.

use std::f32::consts::PI;
use std::time::Duration;

use bevy::prelude::*;

use super::settings::{FollowSetting, LaunchPathSetting, OrbitSetting};

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Scripted camera state machine.
///
/// `Idle -> Launch` happens once, on the throw request. `Launch -> Follow`
/// happens when the launch duration has elapsed. Nothing returns to `Idle`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraDirector {
    #[default]
    Idle,
    Launch {
        started_at: Duration,
    },
    Follow,
}

/// What the camera should do this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCue {
    /// User orbit owns the camera.
    Free,
    Launch { position: Vec3, look_at: Vec3 },
    /// Track the die once it rests.
    Follow,
}

impl CameraDirector {
    /// Enter the launch shot. Returns `false` if a launch already happened.
    pub fn begin_launch(&mut self, now: Duration) -> bool {
        match self {
            CameraDirector::Idle => {
                *self = CameraDirector::Launch { started_at: now };
                true
            }
            _ => false,
        }
    }

    /// Advance the state machine to `now` and report the camera cue.
    pub fn advance(&mut self, now: Duration, path: &LaunchPathSetting) -> CameraCue {
        match *self {
            CameraDirector::Idle => CameraCue::Free,
            CameraDirector::Launch { started_at } => {
                let elapsed = now.saturating_sub(started_at);
                if elapsed < path.duration() {
                    let t = elapsed.as_secs_f32() / path.duration().as_secs_f32();
                    CameraCue::Launch {
                        position: launch_position(t, path),
                        look_at: Vec3::ZERO,
                    }
                } else {
                    *self = CameraDirector::Follow;
                    CameraCue::Follow
                }
            }
            CameraDirector::Follow => CameraCue::Follow,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, CameraDirector::Idle)
    }

    pub fn is_following(&self) -> bool {
        matches!(self, CameraDirector::Follow)
    }
}

pub fn launch_radius(t: f32, path: &LaunchPathSetting) -> f32 {
    path.start_radius - path.radius_shrink * t
}

pub fn launch_azimuth(t: f32, path: &LaunchPathSetting) -> f32 {
    path.start_azimuth + path.azimuth_sweep * t
}

pub fn launch_height(t: f32, path: &LaunchPathSetting) -> f32 {
    path.base_height + path.height_bump * (t * PI).sin()
}

/// Camera position at launch fraction `t` in `[0, 1)`.
pub fn launch_position(t: f32, path: &LaunchPathSetting) -> Vec3 {
    let radius = launch_radius(t, path);
    let azimuth = launch_azimuth(t, path);
    Vec3::new(
        radius * azimuth.sin(),
        launch_height(t, path),
        radius * azimuth.cos(),
    )
}

/// Ease the camera toward its spot above a resting die.
///
/// Returns `None` while the die is still moving; the camera holds.
pub fn follow_step(
    camera: Vec3,
    die_position: Vec3,
    die_speed: f32,
    follow: &FollowSetting,
) -> Option<Vec3> {
    if die_speed < follow.settle_speed {
        Some(camera.lerp(die_position + follow.offset(), follow.damping))
    } else {
        None
    }
}

/// Damped orbit around a target, driven by mouse and keyboard deltas.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitControl {
    pub target: Vec3,
    /// Pending yaw in radians, consumed a damping fraction per frame.
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    /// Pending change of distance as a fraction of the current distance.
    pub zoom_velocity: f32,
}

impl Default for OrbitControl {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }
}

const MIN_POLAR: f32 = 0.05;
const MAX_POLAR: f32 = PI / 2.0 - 0.05;

impl OrbitControl {
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.yaw_velocity += yaw;
        self.pitch_velocity += pitch;
    }

    pub fn zoom(&mut self, amount: f32) {
        self.zoom_velocity += amount;
    }

    pub fn clear(&mut self) {
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.zoom_velocity = 0.0;
    }

    pub fn is_moving(&self) -> bool {
        self.yaw_velocity.abs() > 1e-5
            || self.pitch_velocity.abs() > 1e-5
            || self.zoom_velocity.abs() > 1e-5
    }

    /// Apply one frame of damped motion to `camera` and return the new position.
    ///
    /// Each frame moves by `damping` times the pending motion and the pending
    /// motion decays by `1 - damping`.
    pub fn update(&mut self, camera: Vec3, orbit: &OrbitSetting) -> Vec3 {
        let offset = camera - self.target;
        let distance = offset.length();
        if distance < f32::EPSILON {
            return camera;
        }

        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / distance).clamp(-1.0, 1.0).acos();

        azimuth += self.yaw_velocity * orbit.damping;
        polar = (polar - self.pitch_velocity * orbit.damping).clamp(MIN_POLAR, MAX_POLAR);
        let distance = (distance * (1.0 + self.zoom_velocity * orbit.damping))
            .clamp(orbit.min_distance, orbit.max_distance);

        let decay = 1.0 - orbit.damping;
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
        self.zoom_velocity *= decay;

        self.target
            + Vec3::new(
                distance * polar.sin() * azimuth.sin(),
                distance * polar.cos(),
                distance * polar.sin() * azimuth.cos(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f32 = 1e-4;

    #[test]
    fn test_launch_path_formulas() {
        let path = LaunchPathSetting::default();
        for i in 0..100 {
            let t = i as f32 / 100.0;
            let pos = launch_position(t, &path);
            let radius = Vec2::new(pos.x, pos.z).length();
            assert!((radius - (90.0 - 10.0 * t)).abs() < EPS, "radius at t={t}");
            assert!((pos.y - (20.0 + 10.0 * (t * PI).sin())).abs() < EPS, "height at t={t}");
        }
    }

    #[test]
    fn test_launch_azimuth_endpoints() {
        let path = LaunchPathSetting::default();
        assert!((launch_azimuth(0.0, &path) - FRAC_PI_4).abs() < EPS);
        assert!((launch_azimuth(0.9999, &path) - FRAC_PI_2).abs() < 1e-3);

        let start = launch_position(0.0, &path);
        assert!((start.x - start.z).abs() < EPS);
        assert!((start.y - 20.0).abs() < EPS);
    }

    #[test]
    fn test_begin_launch_only_once() {
        let mut director = CameraDirector::default();
        assert!(director.is_idle());
        assert!(director.begin_launch(Duration::from_millis(500)));
        assert_eq!(
            director,
            CameraDirector::Launch {
                started_at: Duration::from_millis(500)
            }
        );
        assert!(!director.begin_launch(Duration::from_millis(600)));
        assert_eq!(
            director,
            CameraDirector::Launch {
                started_at: Duration::from_millis(500)
            }
        );
    }

    #[test]
    fn test_idle_is_free() {
        let mut director = CameraDirector::Idle;
        let path = LaunchPathSetting::default();
        assert_eq!(director.advance(Duration::from_secs(10), &path), CameraCue::Free);
        assert!(director.is_idle());
    }

    #[test]
    fn test_launch_switches_to_follow_at_duration() {
        let path = LaunchPathSetting::default();
        let start = Duration::from_millis(1000);
        let mut director = CameraDirector::Launch { started_at: start };

        let cue = director.advance(start + Duration::from_millis(1999), &path);
        assert!(matches!(cue, CameraCue::Launch { look_at, .. } if look_at == Vec3::ZERO));
        assert!(!director.is_following());

        let cue = director.advance(start + Duration::from_millis(2000), &path);
        assert_eq!(cue, CameraCue::Follow);
        assert!(director.is_following());

        // Follow is terminal.
        assert_eq!(director.advance(start + Duration::from_secs(60), &path), CameraCue::Follow);
        assert!(!director.begin_launch(start + Duration::from_secs(61)));
    }

    #[test]
    fn test_follow_step_moves_closer_when_resting() {
        let follow = FollowSetting::default();
        let die = Vec3::new(3.0, 0.75, -2.0);
        let goal = die + Vec3::new(10.0, 10.0, 1.0);
        let mut camera = launch_position(0.999, &LaunchPathSetting::default());

        for _ in 0..50 {
            let next = follow_step(camera, die, 0.05, &follow).unwrap();
            assert!(next.distance(goal) < camera.distance(goal));
            camera = next;
        }
    }

    #[test]
    fn test_follow_step_holds_while_moving() {
        let follow = FollowSetting::default();
        assert_eq!(follow_step(Vec3::splat(40.0), Vec3::ZERO, 0.1, &follow), None);
        assert_eq!(follow_step(Vec3::splat(40.0), Vec3::ZERO, 25.0, &follow), None);
    }

    #[test]
    fn test_orbit_keeps_distance_and_decays() {
        let orbit = OrbitSetting::default();
        let mut control = OrbitControl::default();
        control.rotate(1.0, 0.0);

        let camera = Vec3::new(0.0, 30.0, 30.0);
        let next = control.update(camera, &orbit);
        assert!((next.length() - camera.length()).abs() < 1e-3);
        assert!((next.y - camera.y).abs() < 1e-3);
        assert!(next.x > 0.0);
        assert!((control.yaw_velocity - 0.95).abs() < EPS);
    }

    #[test]
    fn test_orbit_zoom_is_clamped() {
        let orbit = OrbitSetting::default();
        let mut control = OrbitControl::default();
        control.zoom(-1000.0);
        let next = control.update(Vec3::new(0.0, 30.0, 30.0), &orbit);
        assert!((next.length() - orbit.min_distance).abs() < 1e-3);

        control.clear();
        assert!(!control.is_moving());
    }
}
