//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes the robot is built from, so the viewer needs no
//! model files.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with per-face normals
//! - **Sphere**: UV sphere with configurable radius and resolution
//! - **Axes**: three colored line segments (X red, Y green, Z blue)
//!
//! ## Usage
//!
//! ```rust
//! use articulate::gfx::geometry::{generate_box, generate_sphere, generate_axes};
//!
//! let torso = generate_box(0.6, 1.0, 0.4);
//! let head = generate_sphere(0.3, 30, 30);
//! let axes = generate_axes(0.5);
//! assert_eq!(axes.vertex_count(), 6);
//! ```
//!
//! Offsets that should travel with a shape but not with its node's transform
//! are baked straight into the vertex data with [`Geometry::translate`].

pub mod primitives;

pub use primitives::*;

use crate::gfx::vertex::{LineVertex, Vertex3D};

/// Triangle geometry ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Colored line-list geometry (two vertices per segment)
#[derive(Debug, Clone, Default)]
pub struct LineData {
    pub vertices: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl LineData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn to_vertices(&self) -> Vec<LineVertex> {
        self.vertices
            .iter()
            .zip(self.colors.iter())
            .map(|(&position, &color)| LineVertex { position, color })
            .collect()
    }
}

/// Geometry attached to a scene node
#[derive(Debug, Clone)]
pub enum Geometry {
    /// Lit triangles, used by body parts
    Surface(GeometryData),
    /// Unlit colored lines, used by axes helpers
    Lines(LineData),
}

impl Geometry {
    /// Moves every vertex by `offset`, permanently
    pub fn translate(&mut self, offset: [f32; 3]) {
        let vertices = match self {
            Geometry::Surface(data) => &mut data.vertices,
            Geometry::Lines(data) => &mut data.vertices,
        };
        for vertex in vertices.iter_mut() {
            vertex[0] += offset[0];
            vertex[1] += offset[1];
            vertex[2] += offset[2];
        }
    }

    /// Builder-style [`Geometry::translate`]
    pub fn translated(mut self, offset: [f32; 3]) -> Self {
        self.translate(offset);
        self
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        match self {
            Geometry::Surface(data) => &data.vertices,
            Geometry::Lines(data) => &data.vertices,
        }
    }

    /// Axis-aligned bounds of the vertex data as (min, max)
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut vertices = self.vertices().iter();
        let first = *vertices.next()?;
        Some(vertices.fold((first, first), |(mut min, mut max), v| {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
            (min, max)
        }))
    }
}
