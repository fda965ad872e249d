//! Tests for loading the simulation config from disk

use std::fs;
use std::path::PathBuf;

use dicelaunch::dice3d::{ConfigSource, SimulationConfig};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dicelaunch_{}_{name}.ron", std::process::id()))
}

#[test]
fn test_config_file_round_trip() {
    let path = temp_path("round_trip");

    let mut config = SimulationConfig::default();
    config.throw.forced_value = Some(7);
    config.physics.solver_iterations = 8;
    config.window.title = "Dice test".to_string();

    let text = config.to_ron().expect("config serializes");
    fs::write(&path, text).expect("write temp config");

    let loaded = SimulationConfig::load_from_file(&path).expect("config loads");
    let _ = fs::remove_file(&path);

    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_is_an_error() {
    let path = temp_path("does_not_exist");
    assert!(SimulationConfig::load_from_file(&path).is_err());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let path = temp_path("fallback_missing");
    let (loaded, source) = SimulationConfig::load_or_default(&path);
    assert_eq!(loaded, SimulationConfig::default());
    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(source.diagnostic(), None);
}

#[test]
fn test_broken_file_falls_back_to_defaults() {
    let path = temp_path("broken");
    fs::write(&path, "(scene: (floor_size: ").expect("write temp config");

    let (loaded, source) = SimulationConfig::load_or_default(&path);
    let _ = fs::remove_file(&path);

    assert_eq!(loaded, SimulationConfig::default());
    // The failure is kept for the startup warning instead of being dropped.
    let error = source.diagnostic().expect("broken file is reported");
    assert!(error.contains(&path.display().to_string()));
    assert!(matches!(source, ConfigSource::Fallback { .. }));
    assert!(source.describe().starts_with("built-in defaults"));
}

#[test]
fn test_valid_file_is_named_as_source() {
    let path = temp_path("valid_source");
    fs::write(&path, "(die: (size: 2.0))").expect("write temp config");

    let (loaded, source) = SimulationConfig::load_or_default(&path);
    let _ = fs::remove_file(&path);

    assert_eq!(loaded.die.size, 2.0);
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert_eq!(source.diagnostic(), None);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let path = temp_path("partial");
    fs::write(&path, "(throw: (delay_ms: 250, forced_value: None))").expect("write temp config");

    let loaded = SimulationConfig::load_from_file(&path).expect("config loads");
    let _ = fs::remove_file(&path);

    assert_eq!(loaded.throw.delay_ms, 250);
    assert_eq!(loaded.throw.forced_value, None);
    assert_eq!(loaded.scene, SimulationConfig::default().scene);
}
