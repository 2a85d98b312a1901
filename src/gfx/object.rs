//! GPU-side mirror of scene nodes
//!
//! Every node carrying geometry gets a [`NodeObject`]: static vertex/index
//! buffers built once, and a small uniform with the node's world transform and
//! color that is rewritten whenever those change.

use wgpu::util::DeviceExt;

use super::geometry::Geometry;
use crate::{
    scene::{transform::to_columns, NodeId, SceneNode},
    wgpu_utils::UniformBuffer,
};

/// Which pipeline a mesh is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
}

pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    element_count: u32,
    pub topology: Topology,
}

impl Mesh {
    pub fn from_geometry(device: &wgpu::Device, geometry: &Geometry, label: &str) -> Self {
        match geometry {
            Geometry::Surface(data) => {
                let vertices = data.to_vertices();
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Vertex Buffer", label)),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Index Buffer", label)),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                Self {
                    vertex_buffer,
                    index_buffer: Some(index_buffer),
                    element_count: data.indices.len() as u32,
                    topology: Topology::Triangles,
                }
            }
            Geometry::Lines(data) => {
                let vertices = data.to_vertices();
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Line Buffer", label)),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                Self {
                    vertex_buffer,
                    index_buffer: None,
                    element_count: vertices.len() as u32,
                    topology: Topology::Lines,
                }
            }
        }
    }
}

/// Per-node uniform, matching `Node` in shader.wgsl
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl NodeUniform {
    pub fn from_node(node: &SceneNode) -> Self {
        Self {
            model: to_columns(&node.world_transform()),
            color: node.material.rgba(),
        }
    }
}

/// Layout of the per-node bind group (group 1)
pub fn node_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Node Bind Group Layout"),
        entries: &[crate::wgpu_utils::binding_types::uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        )],
    })
}

pub struct NodeObject {
    pub node: NodeId,
    pub mesh: Mesh,
    uniform: UniformBuffer<NodeUniform>,
    bind_group: wgpu::BindGroup,
}

impl NodeObject {
    /// Uploads `node`'s geometry; returns None for nodes without any
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        id: NodeId,
        node: &SceneNode,
    ) -> Option<Self> {
        let geometry = node.geometry.as_ref()?;
        let mesh = Mesh::from_geometry(device, geometry, &node.name);
        let uniform = UniformBuffer::new_with_data(device, &NodeUniform::from_node(node));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", node.name)),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.binding_resource(),
            }],
        });

        Some(Self {
            node: id,
            mesh,
            uniform,
            bind_group,
        })
    }

    /// Pushes the node's current transform and color, if they changed
    pub fn update(&mut self, queue: &wgpu::Queue, node: &SceneNode) -> bool {
        self.uniform.update_content(queue, NodeUniform::from_node(node))
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_object(&mut self, object: &'a NodeObject);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        match &mesh.index_buffer {
            Some(index_buffer) => {
                self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                self.draw_indexed(0..mesh.element_count, 0, 0..1);
            }
            None => self.draw(0..mesh.element_count, 0..1),
        }
    }

    fn draw_object(&mut self, object: &'b NodeObject) {
        self.set_bind_group(1, &object.bind_group, &[]);
        self.draw_mesh(&object.mesh);
    }
}
