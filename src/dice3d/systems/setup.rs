//! Scene setup systems
//!
//! This module builds the scene once at startup: camera, lights, fog, the
//! floor, the invisible walls bounding the play area, the die with its face
//! labels, and the throw button. It also applies the rigid-body world
//! parameters.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};
use std::num::NonZeroUsize;

use bevy::prelude::*;
use bevy_material_ui::prelude::MaterialTheme;
use bevy_rapier3d::prelude::*;

use crate::dice3d::meshes::{create_d20, create_number_mesh, d20_face_centers, label_transform};
use crate::dice3d::throw_control::spawn_throw_button;
use crate::dice3d::types::*;

/// Label height relative to the edge length of a face.
const LABEL_SCALE: f32 = 0.3;

/// Main setup system - initializes the entire 3D scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SimulationConfig>,
    theme: Res<MaterialTheme>,
) {
    spawn_camera_and_lights(&mut commands, &config.scene);
    spawn_bounds(&mut commands, &mut meshes, &mut materials, &config);

    let label_assets = create_face_label_assets(&mut meshes, &mut materials, &config.die);
    spawn_die(&mut commands, &mut meshes, &mut materials, &label_assets, &config.die);
    commands.insert_resource(label_assets);

    spawn_throw_button(&mut commands, &theme, &config.throw.button_label);
}

fn color_or(hex: &str, fallback: Color) -> Color {
    parse_hex_color(hex).unwrap_or(fallback)
}

/// Camera with fog, ambient, directional and shadow-casting spot light
pub fn spawn_camera_and_lights(commands: &mut Commands, scene: &SceneSetting) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: scene.fov_degrees.to_radians(),
            near: scene.near,
            far: scene.far,
            ..default()
        }),
        Transform::from_translation(Vec3::from_array(scene.camera_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: color_or(&scene.fog_color, Color::srgb(0.6, 0.6, 1.0)),
            falloff: FogFalloff::ExponentialSquared {
                density: scene.fog_density,
            },
            ..default()
        },
        AmbientLight {
            color: Color::WHITE,
            brightness: scene.ambient_brightness,
            ..default()
        },
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: scene.directional_illuminance,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(scene.directional_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Straight down; Z as up since Y is the view direction.
    commands.spawn((
        spot_light(scene),
        Transform::from_xyz(0.0, scene.spot_height, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));
}

/// Shadow-casting spot light whose shadow depth range brackets the floor.
pub fn spot_light(scene: &SceneSetting) -> SpotLight {
    SpotLight {
        color: color_or(&scene.spot_color, Color::WHITE),
        intensity: scene.spot_intensity,
        range: scene.spot_shadow_far,
        shadow_map_near_z: scene.spot_shadow_near,
        outer_angle: FRAC_PI_3,
        inner_angle: FRAC_PI_3 * 0.8,
        shadows_enabled: true,
        ..default()
    }
}

/// Visible floor plane, static floor body and four invisible static walls
pub fn spawn_bounds(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &SimulationConfig,
) {
    let floor_size = config.scene.floor_size;
    let physics = &config.physics;

    let floor_mat = materials.add(StandardMaterial {
        base_color: color_or(&config.scene.floor_color, Color::srgb(0.0, 0.67, 0.0)),
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 0.9,
        ..default()
    });

    // Top surface at y = 0; the body extends past the walls.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(floor_size, floor_size))),
        MeshMaterial3d(floor_mat),
        Transform::IDENTITY,
        DiceBox,
    ));
    commands.spawn((
        Collider::cuboid(floor_size, 0.5, floor_size),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Fixed,
        Restitution::coefficient(physics.floor_restitution),
        Friction::coefficient(physics.floor_friction),
        DiceBox,
    ));

    let half = floor_size / 2.0;
    for (x, z, rot_y) in wall_placements(floor_size) {
        commands.spawn((
            Collider::cuboid(half, physics.wall_height / 2.0, physics.wall_thickness / 2.0),
            Transform::from_xyz(x, physics.wall_height / 2.0, z)
                .with_rotation(Quat::from_rotation_y(rot_y)),
            RigidBody::Fixed,
            Restitution::coefficient(physics.wall_restitution),
            Friction::coefficient(physics.wall_friction),
            DiceBox,
        ));
    }
}

/// `(x, z, rotation about Y)` of the four walls around a square floor.
pub fn wall_placements(floor_size: f32) -> [(f32, f32, f32); 4] {
    let half = floor_size / 2.0;
    [
        (0.0, half, 0.0),
        (0.0, -half, 0.0),
        (half, 0.0, FRAC_PI_2),
        (-half, 0.0, FRAC_PI_2),
    ]
}

/// One label mesh per value 1-20, sharing a single material
pub fn create_face_label_assets(
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    die: &DieSetting,
) -> FaceLabelAssets {
    let material = materials.add(StandardMaterial {
        base_color: color_or(&die.label_color, Color::WHITE),
        perceptual_roughness: 0.4,
        depth_bias: 1.0,
        ..default()
    });

    let meshes_by_value: HashMap<u32, Handle<Mesh>> = (1..=20)
        .map(|value| (value, meshes.add(create_number_mesh(value))))
        .collect();

    FaceLabelAssets {
        material,
        meshes_by_value,
    }
}

/// Spawn the D20, hidden and with its body disabled until thrown
pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    label_assets: &FaceLabelAssets,
    die: &DieSetting,
) {
    let material = materials.add(StandardMaterial {
        base_color: color_or(&die.color, Color::srgb(1.0, 0.0, 0.0)),
        perceptual_roughness: 0.35,
        reflectance: 0.4,
        ..default()
    });

    let (mesh, collider, face_normals) = create_d20(die.size);
    let component = Die::new(face_normals);

    // Icosahedron edge length from its circumradius.
    let edge = die.size / 0.951_056_5;
    let label_scale = edge * LABEL_SCALE;
    let centers = d20_face_centers(die.size);

    let labels: Vec<(FaceLabel, Handle<Mesh>, Transform)> = component
        .faces
        .iter()
        .zip(centers)
        .enumerate()
        .filter_map(|(i, (face, center))| {
            label_assets
                .meshes_by_value
                .get(&face.value)
                .map(|mesh| (FaceLabel { face: i }, mesh.clone(), label_transform(center, label_scale)))
        })
        .collect();

    commands
        .spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, die.size, 0.0),
            Visibility::Hidden,
            RigidBody::Dynamic,
            RigidBodyDisabled,
            collider,
            Velocity::zero(),
            Restitution::coefficient(die.restitution),
            Friction::coefficient(die.friction),
            ColliderMassProperties::Density(die.density),
            Ccd::enabled(),
            component,
        ))
        .with_children(|parent| {
            for (label, mesh, transform) in labels {
                parent.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(label_assets.material.clone()),
                    transform,
                    label,
                ));
            }
        });
}

/// Log where the settings came from, warning when a config file was ignored.
pub fn report_config_source(source: Option<Res<ConfigSource>>, config: Res<SimulationConfig>) {
    let Some(source) = source else {
        return;
    };
    if let Some(error) = source.diagnostic() {
        warn!("{error}; using default settings");
    }
    info!(
        "Settings from {}, forced face: {:?}",
        source.describe(),
        config.throw.forced_value
    );
}

/// Apply gravity and solver iterations to the rapier world.
pub fn configure_physics(
    config: Res<SimulationConfig>,
    mut rapier_config: Query<&mut RapierConfiguration>,
    mut simulation: Query<&mut RapierContextSimulation>,
) {
    for mut rapier in rapier_config.iter_mut() {
        rapier.gravity = config.physics.gravity();
    }

    if let Some(iterations) = NonZeroUsize::new(config.physics.solver_iterations) {
        for mut sim in simulation.iter_mut() {
            sim.integration_parameters.num_solver_iterations = iterations;
        }
    }

    info!(
        "Physics world: gravity {:?}, {} solver iterations, {:.4}s timestep",
        config.physics.gravity(),
        config.physics.solver_iterations,
        config.physics.timestep()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_light_shadow_range_covers_floor() {
        let scene = SceneSetting::default();
        let light = spot_light(&scene);
        assert!(light.shadows_enabled);
        assert_eq!(light.shadow_map_near_z, 50.0);
        assert_eq!(light.range, 110.0);

        // Floor center and corners sit between the near and far planes.
        let half = scene.floor_size / 2.0;
        let corner = Vec3::new(half, 0.0, half).distance(Vec3::Y * scene.spot_height);
        assert!(light.shadow_map_near_z < scene.spot_height);
        assert!(corner < light.range);
    }

    #[test]
    fn test_walls_surround_floor() {
        let walls = wall_placements(30.0);
        assert_eq!(walls.len(), 4);
        for (x, z, rot) in walls {
            // Each wall sits on one edge of the floor.
            assert!((x.abs() - 15.0).abs() < 1e-5 || (z.abs() - 15.0).abs() < 1e-5);
            if x == 0.0 {
                assert_eq!(rot, 0.0);
            } else {
                assert_eq!(rot, FRAC_PI_2);
            }
        }
    }
}
