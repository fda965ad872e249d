//! Simulation settings and persistence
//!
//! Every hand-tuned constant of the scene lives here: throw ranges, camera
//! path, settle threshold, physics parameters. Settings are read from a RON
//! file when one exists and fall back to defaults otherwise.

use std::f32::consts::FRAC_PI_4;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "dicelaunch.ron";

/// Parse a `#rrggbb` string into a Bevy color.
pub fn parse_hex_color(hex: &str) -> Result<Color, String> {
    Srgba::hex(hex)
        .map(Color::from)
        .map_err(|err| format!("Invalid color '{}': {:?}", hex, err))
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSetting {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSetting {
    fn default() -> Self {
        Self {
            title: "Dice Launch".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Camera, lights, floor and fog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSetting {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: [f32; 3],
    pub floor_size: f32,
    pub floor_color: String,
    pub fog_color: String,
    pub fog_density: f32,
    pub ambient_brightness: f32,
    pub directional_position: [f32; 3],
    pub directional_illuminance: f32,
    pub spot_color: String,
    pub spot_height: f32,
    pub spot_intensity: f32,
    /// Shadow depth range of the spot light.
    pub spot_shadow_near: f32,
    pub spot_shadow_far: f32,
}

impl Default for SceneSetting {
    fn default() -> Self {
        Self {
            fov_degrees: 25.0,
            near: 0.01,
            far: 20000.0,
            camera_position: [0.0, 30.0, 30.0],
            floor_size: 30.0,
            floor_color: "#00aa00".to_string(),
            fog_color: "#9999ff".to_string(),
            fog_density: 0.00025,
            ambient_brightness: 200.0,
            directional_position: [-1000.0, 1000.0, 1000.0],
            directional_illuminance: 4000.0,
            spot_color: "#efdfd5".to_string(),
            spot_height: 100.0,
            spot_intensity: 60_000_000.0,
            spot_shadow_near: 50.0,
            spot_shadow_far: 110.0,
        }
    }
}

/// Rigid-body world parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSetting {
    pub gravity: [f32; 3],
    pub solver_iterations: usize,
    pub timestep_hz: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub floor_friction: f32,
    pub floor_restitution: f32,
    pub wall_friction: f32,
    pub wall_restitution: f32,
}

impl Default for PhysicsSetting {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.82 * 20.0, 0.0],
            solver_iterations: 16,
            timestep_hz: 60.0,
            wall_height: 15.0,
            wall_thickness: 1.0,
            floor_friction: 0.01,
            floor_restitution: 0.5,
            wall_friction: 0.0,
            wall_restitution: 1.0,
        }
    }
}

impl PhysicsSetting {
    pub fn gravity(&self) -> Vec3 {
        vec3(self.gravity)
    }

    pub fn timestep(&self) -> f32 {
        1.0 / self.timestep_hz
    }
}

/// Look and mass of the thrown D20.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DieSetting {
    pub size: f32,
    pub color: String,
    pub label_color: String,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for DieSetting {
    fn default() -> Self {
        Self {
            size: 1.5,
            color: "#ff0000".to_string(),
            label_color: "#ffffff".to_string(),
            density: 3.0,
            friction: 0.3,
            restitution: 0.5,
        }
    }
}

/// Ranges the throw controller samples from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowSetting {
    /// Spawn corner; one shared jitter is added to all three axes.
    pub spawn_origin: [f32; 3],
    pub spawn_jitter: f32,
    /// Maximum tilt around X and Z, in degrees, either direction.
    pub tilt_degrees: f32,
    pub base_velocity: [f32; 3],
    /// Vertical jitter is sampled independently of the spawn jitter.
    pub vertical_jitter: f32,
    /// Angular velocity is sampled in `[-spin, spin)` per axis.
    pub spin: f32,
    pub delay_ms: u64,
    /// Face value the die is made to show once it rests. `None` keeps the natural result.
    pub forced_value: Option<u32>,
    pub button_label: String,
}

impl Default for ThrowSetting {
    fn default() -> Self {
        Self {
            spawn_origin: [-10.0, 2.0, -10.0],
            spawn_jitter: 10.0,
            tilt_degrees: 45.0,
            base_velocity: [25.0, 40.0, 15.0],
            vertical_jitter: 20.0,
            spin: 10.0,
            delay_ms: 1000,
            forced_value: Some(20),
            button_label: "Roll the die".to_string(),
        }
    }
}

impl ThrowSetting {
    pub fn spawn_origin(&self) -> Vec3 {
        vec3(self.spawn_origin)
    }

    pub fn base_velocity(&self) -> Vec3 {
        vec3(self.base_velocity)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Closed-form launch fly-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchPathSetting {
    pub start_radius: f32,
    pub radius_shrink: f32,
    pub start_azimuth: f32,
    pub azimuth_sweep: f32,
    pub base_height: f32,
    pub height_bump: f32,
    pub duration_ms: u64,
}

impl Default for LaunchPathSetting {
    fn default() -> Self {
        Self {
            start_radius: 90.0,
            radius_shrink: 10.0,
            start_azimuth: FRAC_PI_4,
            azimuth_sweep: FRAC_PI_4,
            base_height: 20.0,
            height_bump: 10.0,
            duration_ms: 2000,
        }
    }
}

impl LaunchPathSetting {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowSetting {
    pub offset: [f32; 3],
    pub damping: f32,
    /// Linear speed under which the die counts as resting.
    pub settle_speed: f32,
}

impl Default for FollowSetting {
    fn default() -> Self {
        Self {
            offset: [10.0, 10.0, 1.0],
            damping: 0.05,
            settle_speed: 0.1,
        }
    }
}

impl FollowSetting {
    pub fn offset(&self) -> Vec3 {
        vec3(self.offset)
    }
}

/// Free orbit while no scripted shot runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSetting {
    pub damping: f32,
    /// Radians per pixel of mouse drag.
    pub rotate_speed: f32,
    /// Radians per second while a rotate key is held.
    pub key_rotate_speed: f32,
    /// Fraction of the distance per wheel line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSetting {
    fn default() -> Self {
        Self {
            damping: 0.05,
            rotate_speed: 0.005,
            key_rotate_speed: 1.0,
            zoom_speed: 0.05,
            min_distance: 10.0,
            max_distance: 200.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSetting {
    pub launch: LaunchPathSetting,
    pub follow: FollowSetting,
    pub orbit: OrbitSetting,
}

/// Where the effective settings came from.
///
/// Settings are loaded before the app (and its log subscriber) exists, so the
/// outcome is kept and reported once the app starts.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
    /// The file exists but could not be used; defaults were taken instead.
    Fallback { path: PathBuf, error: String },
}

impl ConfigSource {
    /// Load failure that should be surfaced as a warning, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ConfigSource::Fallback { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Defaults => "built-in defaults".to_string(),
            ConfigSource::File(path) => path.display().to_string(),
            ConfigSource::Fallback { path, .. } => {
                format!("built-in defaults ({} ignored)", path.display())
            }
        }
    }
}

/// Every tunable of the simulation.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub window: WindowSetting,
    pub scene: SceneSetting,
    pub physics: PhysicsSetting,
    pub die: DieSetting,
    pub throw: ThrowSetting,
    pub camera: CameraSetting,
}

impl SimulationConfig {
    /// Load and validate settings from a RON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config = Self::from_ron(&contents)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn from_ron(contents: &str) -> Result<Self, String> {
        let config: Self = ron::from_str(contents).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| e.to_string())
    }

    /// Use the file at `path` when it exists, defaults otherwise.
    ///
    /// A file that exists but does not load is ignored; the error is kept in
    /// the returned [`ConfigSource`].
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::default(), ConfigSource::Defaults);
        }

        match Self::load_from_file(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(error) => (
                Self::default(),
                ConfigSource::Fallback {
                    path: path.to_path_buf(),
                    error,
                },
            ),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.scene.floor_size <= 0.0 {
            return Err(format!("floor_size must be positive, got {}", self.scene.floor_size));
        }
        if !(self.scene.spot_shadow_near > 0.0
            && self.scene.spot_shadow_near < self.scene.spot_shadow_far)
        {
            return Err(format!(
                "spot shadow range must satisfy 0 < near < far, got {}..{}",
                self.scene.spot_shadow_near, self.scene.spot_shadow_far
            ));
        }
        if self.die.size <= 0.0 {
            return Err(format!("die size must be positive, got {}", self.die.size));
        }
        if self.physics.solver_iterations == 0 {
            return Err("solver_iterations must be at least 1".to_string());
        }
        if self.physics.timestep_hz <= 0.0 {
            return Err(format!("timestep_hz must be positive, got {}", self.physics.timestep_hz));
        }
        if self.camera.launch.duration_ms == 0 {
            return Err("launch duration_ms must be positive".to_string());
        }
        for (name, damping) in [
            ("follow", self.camera.follow.damping),
            ("orbit", self.camera.orbit.damping),
        ] {
            if !(damping > 0.0 && damping <= 1.0) {
                return Err(format!("{name} damping must be in (0, 1], got {damping}"));
            }
        }
        if self.camera.follow.settle_speed < 0.0 {
            return Err("settle_speed cannot be negative".to_string());
        }
        if self.camera.orbit.min_distance > self.camera.orbit.max_distance {
            return Err("orbit min_distance exceeds max_distance".to_string());
        }
        if let Some(value) = self.throw.forced_value {
            if !(1..=20).contains(&value) {
                return Err(format!("forced_value must be between 1 and 20, got {value}"));
            }
        }
        for color in [
            &self.scene.floor_color,
            &self.scene.fog_color,
            &self.scene.spot_color,
            &self.die.color,
            &self.die.label_color,
        ] {
            parse_hex_color(color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_throw_ranges() {
        let throw = ThrowSetting::default();
        assert_eq!(throw.spawn_origin(), Vec3::new(-10.0, 2.0, -10.0));
        assert_eq!(throw.base_velocity(), Vec3::new(25.0, 40.0, 15.0));
        assert_eq!(throw.delay(), Duration::from_millis(1000));
        assert_eq!(throw.forced_value, Some(20));
    }

    #[test]
    fn test_default_physics() {
        let physics = PhysicsSetting::default();
        assert!((physics.gravity().y + 196.4).abs() < 1e-3);
        assert_eq!(physics.solver_iterations, 16);
        assert!((physics.timestep() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = SimulationConfig::from_ron("(throw: (delay_ms: 250))").unwrap();
        assert_eq!(config.throw.delay_ms, 250);
        assert_eq!(config.throw.spawn_jitter, 10.0);
        assert_eq!(config.camera, CameraSetting::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SimulationConfig::default();
        config.camera.follow.damping = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.throw.forced_value = Some(21);
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.die.color = "not a color".to_string();
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.physics.solver_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.scene.spot_shadow_near = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = SimulationConfig::default();
        config.throw.forced_value = None;
        let text = config.to_ron().unwrap();
        assert_eq!(SimulationConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_config_source_diagnostic() {
        let fallback = ConfigSource::Fallback {
            path: PathBuf::from("dicelaunch.ron"),
            error: "Failed to load dicelaunch.ron: bad".to_string(),
        };
        assert_eq!(fallback.diagnostic(), Some("Failed to load dicelaunch.ron: bad"));
        assert!(fallback.describe().starts_with("built-in defaults"));

        let file = ConfigSource::File(PathBuf::from("dicelaunch.ron"));
        assert_eq!(file.diagnostic(), None);
        assert_eq!(file.describe(), "dicelaunch.ron");
        assert_eq!(ConfigSource::Defaults.diagnostic(), None);
    }

    #[test]
    fn test_parse_hex_color() {
        assert!(parse_hex_color("#00aa00").is_ok());
        assert!(parse_hex_color("efdfd5").is_ok());
        assert!(parse_hex_color("#zz0000").is_err());
    }
}
