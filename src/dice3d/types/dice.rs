//! Dice-related types and components
//!
//! This module contains the Die component with its labelled faces, the
//! static bounds marker, DiceResults and RollState.

use std::collections::HashMap;

use bevy::prelude::*;

/// One face of a die: outward normal in the die's local space and the value printed on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieFace {
    pub normal: Vec3,
    pub value: u32,
}

/// Component attached to the die entity
#[derive(Component, Debug, Clone)]
pub struct Die {
    pub faces: Vec<DieFace>,
}

impl Die {
    pub fn new(face_normals: Vec<(Vec3, u32)>) -> Self {
        Self {
            faces: face_normals
                .into_iter()
                .map(|(normal, value)| DieFace { normal, value })
                .collect(),
        }
    }

    /// Index of the face whose world normal points most directly up.
    pub fn face_up(&self, rotation: Quat) -> Option<usize> {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, face)| (i, (rotation * face.normal).dot(Vec3::Y)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Value currently printed on the upward face.
    pub fn value_up(&self, rotation: Quat) -> Option<u32> {
        self.face_up(rotation).map(|i| self.faces[i].value)
    }

    /// Make the face at `face_up` carry `value` by swapping labels with the
    /// face that printed it. Returns `true` if any label moved.
    ///
    /// Values not printed on the die leave it untouched.
    pub fn force_face_value(&mut self, face_up: usize, value: u32) -> bool {
        let Some(current) = self.faces.get(face_up).map(|f| f.value) else {
            return false;
        };
        if current == value {
            return false;
        }
        let Some(other) = self.faces.iter().position(|f| f.value == value) else {
            return false;
        };
        self.faces[other].value = current;
        self.faces[face_up].value = value;
        true
    }
}

/// Number label on one face of the die, child of the die entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct FaceLabel {
    pub face: usize,
}

/// Shared label material and one mesh per printable value.
#[derive(Resource, Clone)]
pub struct FaceLabelAssets {
    pub material: Handle<StandardMaterial>,
    pub meshes_by_value: HashMap<u32, Handle<Mesh>>,
}

/// Marker component for the static floor and walls
#[derive(Component)]
pub struct DiceBox;

/// Resource storing the result of the throw
#[derive(Resource, Debug, Default)]
pub struct DiceResults {
    pub value: Option<u32>,
    /// Whether the labels were rearranged to show the intended value.
    pub relabelled: bool,
}

/// Resource tracking the current roll state
#[derive(Resource, Debug, Default)]
pub struct RollState {
    pub rolling: bool,
    pub settle_timer: f32,
    /// Face value the die should show once it rests.
    pub intended_value: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn cube() -> Die {
        Die::new(vec![
            (Vec3::Y, 6),
            (Vec3::NEG_Y, 1),
            (Vec3::X, 3),
            (Vec3::NEG_X, 4),
            (Vec3::Z, 2),
            (Vec3::NEG_Z, 5),
        ])
    }

    #[test]
    fn test_face_up_identity() {
        let die = cube();
        assert_eq!(die.value_up(Quat::IDENTITY), Some(6));
    }

    #[test]
    fn test_face_up_rotated() {
        let die = cube();
        // A clockwise quarter turn about Z brings -X up.
        let rotation = Quat::from_rotation_z(-PI / 2.0);
        assert_eq!(die.value_up(rotation), Some(4));
        assert_eq!(die.value_up(Quat::from_rotation_z(PI / 2.0)), Some(3));
        assert_eq!(die.value_up(Quat::from_rotation_x(PI)), Some(1));
    }

    #[test]
    fn test_force_face_value_swaps_labels() {
        let mut die = cube();
        assert!(die.force_face_value(0, 2));
        assert_eq!(die.value_up(Quat::IDENTITY), Some(2));
        assert_eq!(die.faces[4].value, 6);

        let mut values: Vec<u32> = die.faces.iter().map(|f| f.value).collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_force_face_value_noop_cases() {
        let mut die = cube();
        assert!(!die.force_face_value(0, 6));
        assert!(!die.force_face_value(0, 7));
        assert!(!die.force_face_value(42, 1));
        assert_eq!(die.value_up(Quat::IDENTITY), Some(6));
    }

    #[test]
    fn test_roll_state_default() {
        let state = RollState::default();
        assert!(!state.rolling);
        assert_eq!(state.settle_timer, 0.0);
        assert_eq!(state.intended_value, None);
    }
}
