//! Number labels for die faces
//!
//! Numbers are built from seven-segment strokes as flat quads in the XY plane
//! facing +Z, one unit tall and centered on the origin. 6 and 9 get an
//! underline so they read correctly from any side.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy_mesh::{Indices, PrimitiveTopology};

const DIGIT_WIDTH: f32 = 0.55;
const DIGIT_HEIGHT: f32 = 1.0;
const STROKE: f32 = 0.14;
const DIGIT_SPACING: f32 = 0.15;
const UNDERLINE_GAP: f32 = 0.1;

/// Segment bits: a b c d e f g (top, upper right, lower right, bottom,
/// lower left, upper left, middle).
const SEGMENTS: [u8; 10] = [
    0b1111110, // 0
    0b0110000, // 1
    0b1101101, // 2
    0b1111001, // 3
    0b0110011, // 4
    0b1011011, // 5
    0b1011111, // 6
    0b1110000, // 7
    0b1111111, // 8
    0b1111011, // 9
];

/// Axis-aligned rectangle as `[min_x, min_y, max_x, max_y]`.
pub type Rect2 = [f32; 4];

fn digit_rects(digit: u32, offset_x: f32) -> Vec<Rect2> {
    let w = DIGIT_WIDTH / 2.0;
    let h = DIGIT_HEIGHT / 2.0;
    let t = STROKE;
    let x = offset_x;

    let strokes: [Rect2; 7] = [
        [x - w, h - t, x + w, h],
        [x + w - t, 0.0, x + w, h],
        [x + w - t, -h, x + w, 0.0],
        [x - w, -h, x + w, -h + t],
        [x - w, -h, x - w + t, 0.0],
        [x - w, 0.0, x - w + t, h],
        [x - w, -t / 2.0, x + w, t / 2.0],
    ];

    let mask = SEGMENTS[(digit % 10) as usize];
    strokes
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << (6 - i)) != 0)
        .map(|(_, r)| *r)
        .collect()
}

fn digits_of(value: u32) -> Vec<u32> {
    value
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect()
}

/// Rectangles making up the label for `value`.
pub fn number_rects(value: u32) -> Vec<Rect2> {
    let digits = digits_of(value);
    let count = digits.len() as f32;
    let total_width = count * DIGIT_WIDTH + (count - 1.0) * DIGIT_SPACING;
    let start_x = -total_width / 2.0 + DIGIT_WIDTH / 2.0;

    let mut rects: Vec<Rect2> = digits
        .iter()
        .enumerate()
        .flat_map(|(i, &d)| digit_rects(d, start_x + i as f32 * (DIGIT_WIDTH + DIGIT_SPACING)))
        .collect();

    if value == 6 || value == 9 {
        let y = -DIGIT_HEIGHT / 2.0 - UNDERLINE_GAP;
        rects.push([-total_width / 2.0, y - STROKE, total_width / 2.0, y]);
    }

    rects
}

/// Flat label mesh for `value`.
pub fn create_number_mesh(value: u32) -> Mesh {
    let rects = number_rects(value);
    let mut positions = Vec::with_capacity(rects.len() * 4);
    let mut uvs = Vec::with_capacity(rects.len() * 4);
    let mut indices = Vec::with_capacity(rects.len() * 6);

    for [x0, y0, x1, y1] in rects {
        let base = positions.len() as u32;
        for (x, y) in [(x0, y0), (x1, y0), (x1, y1), (x0, y1)] {
            positions.push([x, y, 0.0]);
            uvs.push([x + 0.5, 0.5 - y]);
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

/// Transform placing a label flat on a face, slightly above the surface.
pub fn label_transform(face_center: Vec3, scale: f32) -> Transform {
    let normal = face_center.normalize();
    Transform::from_translation(face_center * 1.01)
        .with_rotation(Quat::from_rotation_arc(Vec3::Z, normal))
        .with_scale(Vec3::splat(scale))
}
