use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy_mesh::{Indices, PrimitiveTopology};
use bevy_rapier3d::prelude::*;

/// Icosahedron vertices for a die with circumradius `size`.
pub fn d20_vertices(size: f32) -> Vec<Vec3> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = size / (1.0 + phi * phi).sqrt();

    vec![
        Vec3::new(0.0, 1.0, phi) * s,
        Vec3::new(0.0, -1.0, phi) * s,
        Vec3::new(0.0, 1.0, -phi) * s,
        Vec3::new(0.0, -1.0, -phi) * s,
        Vec3::new(1.0, phi, 0.0) * s,
        Vec3::new(-1.0, phi, 0.0) * s,
        Vec3::new(1.0, -phi, 0.0) * s,
        Vec3::new(-1.0, -phi, 0.0) * s,
        Vec3::new(phi, 0.0, 1.0) * s,
        Vec3::new(-phi, 0.0, 1.0) * s,
        Vec3::new(phi, 0.0, -1.0) * s,
        Vec3::new(-phi, 0.0, -1.0) * s,
    ]
}

// Counter-clockwise seen from outside.
pub const D20_FACES: [[usize; 3]; 20] = [
    [0, 1, 8],
    [0, 8, 4],
    [0, 4, 5],
    [0, 5, 9],
    [0, 9, 1],
    [1, 6, 8],
    [8, 6, 10],
    [8, 10, 4],
    [4, 10, 2],
    [4, 2, 5],
    [5, 2, 11],
    [5, 11, 9],
    [9, 11, 7],
    [9, 7, 1],
    [1, 7, 6],
    [3, 6, 7],
    [3, 10, 6],
    [3, 2, 10],
    [3, 11, 2],
    [3, 7, 11],
];

/// Center of each face, in face order.
pub fn d20_face_centers(size: f32) -> Vec<Vec3> {
    let vertices = d20_vertices(size);
    D20_FACES
        .iter()
        .map(|face| (vertices[face[0]] + vertices[face[1]] + vertices[face[2]]) / 3.0)
        .collect()
}

/// Mesh, convex hull collider and labelled face normals of a D20.
pub fn create_d20(size: f32) -> (Mesh, Collider, Vec<(Vec3, u32)>) {
    let vertices = d20_vertices(size);

    let face_normals: Vec<(Vec3, u32)> = d20_face_centers(size)
        .into_iter()
        .enumerate()
        .map(|(i, center)| (center.normalize(), (i + 1) as u32))
        .collect();

    let collider = Collider::convex_hull(&vertices).unwrap_or(Collider::ball(size));
    let mesh = create_d20_mesh(&vertices);

    (mesh, collider, face_normals)
}

fn create_d20_mesh(vertices: &[Vec3]) -> Mesh {
    let mut positions = Vec::with_capacity(D20_FACES.len() * 3);
    let mut normals = Vec::with_capacity(D20_FACES.len() * 3);

    for face in &D20_FACES {
        let v0 = vertices[face[0]];
        let v1 = vertices[face[1]];
        let v2 = vertices[face[2]];
        let n = (v1 - v0).cross(v2 - v0).normalize().to_array();

        positions.extend([v0.to_array(), v1.to_array(), v2.to_array()]);
        normals.extend([n, n, n]);
    }

    let indices: Vec<u32> = (0..positions.len() as u32).collect();
    let uvs: Vec<[f32; 2]> = vec![[0.5, 0.5]; positions.len()];

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}
