//! # Transform Helpers
//!
//! Translation and axis-rotation matrices used by the scene graph. All matrices
//! are cgmath `Matrix4<f32>` (column-major storage, column vectors), so they can
//! be uploaded to the GPU without conversion.

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

/// Principal axis for incremental rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Builds the right-handed rotation of `angle_degrees` about `axis`.
///
/// Written out row by row (column vectors):
///
/// ```text
/// X: [1 0 0 0] [0 c -s 0] [0 s c 0] [0 0 0 1]
/// Y: [c 0 s 0] [0 1 0 0] [-s 0 c 0] [0 0 0 1]
/// Z: [c -s 0 0] [s c 0 0] [0 0 1 0] [0 0 0 1]
/// ```
///
/// # Examples
///
/// ```
/// use articulate::scene::transform::{compose_rotation, Axis};
/// use cgmath::Vector4;
///
/// let turned = compose_rotation(Axis::X, 90.0) * Vector4::new(0.0, 1.0, 0.0, 0.0);
/// assert!((turned.z - 1.0).abs() < 1e-6);
/// ```
pub fn compose_rotation(axis: Axis, angle_degrees: f32) -> Matrix4<f32> {
    let angle = Deg(angle_degrees);
    match axis {
        Axis::X => Matrix4::from_angle_x(angle),
        Axis::Y => Matrix4::from_angle_y(angle),
        Axis::Z => Matrix4::from_angle_z(angle),
    }
}

/// Pure translation by (x, y, z)
pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Identity transform
pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

/// Flattens a matrix into the `[[f32; 4]; 4]` column layout shaders expect
pub fn to_columns(matrix: &Matrix4<f32>) -> [[f32; 4]; 4] {
    (*matrix).into()
}
