//! Tests for the D20 geometry and face reading

use bevy::prelude::*;

use dicelaunch::dice3d::meshes::{create_d20, d20_face_centers, number_rects};
use dicelaunch::dice3d::Die;

fn d20() -> Die {
    let (_, _, faces) = create_d20(1.5);
    Die::new(faces)
}

#[test]
fn test_d20_has_twenty_distinct_values() {
    let die = d20();
    assert_eq!(die.faces.len(), 20);

    let mut values: Vec<u32> = die.faces.iter().map(|f| f.value).collect();
    values.sort_unstable();
    assert_eq!(values, (1..=20).collect::<Vec<_>>());
}

#[test]
fn test_d20_face_normals_are_unit() {
    for face in d20().faces {
        assert!((face.normal.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn test_every_face_can_be_up() {
    let die = d20();
    for (i, face) in die.faces.iter().enumerate() {
        // Rotate this face's normal onto +Y.
        let rotation = Quat::from_rotation_arc(face.normal, Vec3::Y);
        assert_eq!(die.face_up(rotation), Some(i));
        assert_eq!(die.value_up(rotation), Some(face.value));
    }
}

#[test]
fn test_forcing_value_swaps_labels() {
    let mut die = d20();
    let rotation = Quat::from_rotation_arc(die.faces[3].normal, Vec3::Y);
    let up = die.face_up(rotation).expect("a face is up");
    let natural = die.faces[up].value;
    let target = if natural == 20 { 1 } else { 20 };

    assert!(die.force_face_value(up, target));
    assert_eq!(die.value_up(rotation), Some(target));

    // Still a permutation of 1..=20.
    let mut values: Vec<u32> = die.faces.iter().map(|f| f.value).collect();
    values.sort_unstable();
    assert_eq!(values, (1..=20).collect::<Vec<_>>());
}

#[test]
fn test_forcing_current_value_is_a_no_op() {
    let mut die = d20();
    let value = die.faces[5].value;
    assert!(!die.force_face_value(5, value));
    assert_eq!(die.faces[5].value, value);
}

#[test]
fn test_face_centers_lie_inside_circumsphere() {
    for center in d20_face_centers(1.5) {
        let r = center.length();
        assert!(r > 1.0 && r < 1.5);
    }
}

#[test]
fn test_every_value_has_a_label() {
    for value in 1..=20 {
        assert!(!number_rects(value).is_empty(), "no label for {value}");
    }
}
