//! # Primitive Shape Generation
//!
//! Functions generating the shapes the viewer draws. Surfaces come with
//! outward normals.

use super::{GeometryData, LineData};
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has its own four vertices so normals stay flat.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();

    // Two counter-clockwise triangles per face
    data.indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();

    data
}

/// Generate an axis-aligned box of the given extents, centered at the origin
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = generate_cube();
    for vertex in data.vertices.iter_mut() {
        vertex[0] *= width;
        vertex[1] *= height;
        vertex[2] *= depth;
    }
    data
}

/// Generate a UV sphere with specified radius and resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            // Y-up
            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate an axes helper: one segment of length `size` along each positive axis
///
/// X is red, Y is green and Z is blue.
pub fn generate_axes(size: f32) -> LineData {
    let axes = [
        ([size, 0.0, 0.0], [1.0, 0.0, 0.0]),
        ([0.0, size, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, size], [0.0, 0.0, 1.0]),
    ];

    let mut data = LineData::default();
    for (tip, color) in axes {
        data.vertices.push([0.0, 0.0, 0.0]);
        data.vertices.push(tip);
        data.colors.push(color);
        data.colors.push(color);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.normals.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_box_extents() {
        let leg = generate_box(0.2, 0.8, 0.3);
        let max_x = leg.vertices.iter().map(|v| v[0]).fold(f32::MIN, f32::max);
        let min_y = leg.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        let max_z = leg.vertices.iter().map(|v| v[2]).fold(f32::MIN, f32::max);
        assert!((max_x - 0.1).abs() < 1e-6);
        assert!((min_y + 0.4).abs() < 1e-6);
        assert!((max_z - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.3, 8, 6);
        assert_eq!(sphere.vertices.len(), 9 * 7);
        assert_eq!(sphere.indices.len(), 8 * 6 * 6);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn test_axes_generation() {
        let axes = generate_axes(0.5);
        assert_eq!(axes.vertices.len(), 6);
        assert_eq!(axes.colors.len(), 6);
        assert_eq!(axes.vertices[3], [0.0, 0.5, 0.0]);
        assert_eq!(axes.colors[5], [0.0, 0.0, 1.0]);
    }
}
