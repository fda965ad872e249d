pub mod d20;
pub mod labels;

pub use d20::{create_d20, d20_face_centers, d20_vertices, D20_FACES};
pub use labels::{create_number_mesh, label_transform, number_rects};
