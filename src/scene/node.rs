use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::geometry::Geometry;

use super::material::Material;

/// Handle to a node stored in a [`SceneGraph`](super::SceneGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is, which decides how it is drawn and navigated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level scene container
    Root,
    /// Non-renderable assembly node (the robot itself)
    Group,
    /// Renderable body part
    Part,
    /// Invisible pivot carrying an axes helper
    Pivot,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Root => "Scene",
            NodeKind::Group => "Group",
            NodeKind::Part => "Mesh",
            NodeKind::Pivot => "AxesHelper",
        }
    }
}

/// A node in the scene graph.
///
/// `world_transform` is a cache owned by the graph and only written while
/// refreshing; read it through [`SceneNode::world_transform`].
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub local_transform: Matrix4<f32>,
    pub material: Material,
    pub geometry: Option<Geometry>,
    pub(crate) world_transform: Matrix4<f32>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    fn new(name: &str, kind: NodeKind, material: Material, geometry: Option<Geometry>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            local_transform: Matrix4::identity(),
            material,
            geometry,
            world_transform: Matrix4::identity(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn root(name: &str) -> Self {
        Self::new(name, NodeKind::Root, Material::invisible(), None)
    }

    pub fn group(name: &str) -> Self {
        Self::new(name, NodeKind::Group, Material::invisible(), None)
    }

    pub fn part(name: &str, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Part, material, Some(geometry))
    }

    /// Pivots start hidden; the selection navigator shows them on demand
    pub fn pivot(name: &str, axes: Geometry) -> Self {
        Self::new(name, NodeKind::Pivot, Material::invisible(), Some(axes))
    }

    pub fn world_transform(&self) -> Matrix4<f32> {
        self.world_transform
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_pivot(&self) -> bool {
        self.kind == NodeKind::Pivot
    }

    pub fn is_renderable(&self) -> bool {
        self.kind == NodeKind::Part
    }
}
