// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_material_ui::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;

use dicelaunch::dice3d::{
    ConfigSource, DiceLaunchPlugin, DiceScenePlugin, SimulationConfig, ThrowRng,
    DEFAULT_CONFIG_PATH,
};

#[derive(Parser)]
#[command(name = "dicelaunch")]
#[command(
    author,
    version,
    about = "Dice Launch - throw a single D20 with physics and a scripted camera"
)]
struct Cli {
    /// Path to a RON config file (defaults to ./dicelaunch.ron when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the throw randomization
    #[arg(long)]
    seed: Option<u64>,

    /// Face value the die is made to show once it rests (1-20)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=20))]
    value: Option<u32>,

    /// Keep the natural result instead of forcing a face value
    #[arg(long, conflicts_with = "value")]
    no_force: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    dump_config: bool,

    /// With --dump-config, print JSON instead of RON
    #[arg(long, requires = "dump_config")]
    json: bool,
}

/// Effective config plus where it came from.
fn load_config(cli: &Cli) -> Result<(SimulationConfig, ConfigSource), String> {
    let (mut config, source) = match &cli.config {
        Some(path) => (
            SimulationConfig::load_from_file(path)?,
            ConfigSource::File(path.clone()),
        ),
        None => SimulationConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };

    if let Some(value) = cli.value {
        config.throw.forced_value = Some(value);
    }
    if cli.no_force {
        config.throw.forced_value = None;
    }

    config.validate()?;
    Ok((config, source))
}

fn dump_config(config: &SimulationConfig, json: bool) -> Result<String, String> {
    if json {
        serde_json::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {e}"))
    } else {
        config.to_ron()
    }
}

fn main() {
    let cli = Cli::parse();

    let (config, source) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if cli.dump_config {
        match dump_config(&config, cli.json) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let rng = match cli.seed {
        Some(seed) => ThrowRng::seeded(seed),
        None => ThrowRng::default(),
    };

    let timestep = TimestepMode::Fixed {
        dt: config.physics.timestep(),
        substeps: 1,
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window.title.clone(),
                        resolution: (config.window.width, config.window.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,naga=warn,bevy_material_ui=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(MaterialUiPlugin)
        .insert_resource(timestep)
        .insert_resource(config)
        .insert_resource(rng)
        .insert_resource(source)
        .add_plugins((DiceLaunchPlugin, DiceScenePlugin))
        .run();
}
