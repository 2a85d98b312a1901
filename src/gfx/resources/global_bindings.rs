//! Global uniform bindings for camera and scene data
//!
//! Everything shared across all nodes in a frame: camera matrices, the point
//! lights and the ambient term. Bound at group 0 in both pipelines.

use log::warn;

use crate::{
    config::PointLight,
    gfx::camera::camera_utils::CameraUniform,
    scene::material::hex_to_rgb,
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Number of light slots in the shader's uniform block
pub const MAX_LIGHTS: usize = 4;

/// One point light as laid out in the shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// xyz position, w intensity
    pub position: [f32; 4],
    pub color: [f32; 4],
}

/// Global uniform buffer content.
///
/// MUST match the `Globals` struct in shader.wgsl exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
    pub light_count: u32,
    _padding: [u32; 3],
}

impl GlobalUBOContent {
    /// Packs the camera and lighting for upload.
    ///
    /// Lights past [`MAX_LIGHTS`] are dropped with a warning.
    pub fn new(camera: CameraUniform, ambient_rgb: u32, lights: &[PointLight]) -> Self {
        if lights.len() > MAX_LIGHTS {
            warn!(
                "{} lights configured, only the first {} are used",
                lights.len(),
                MAX_LIGHTS
            );
        }

        let mut slots = [LightUniform::default(); MAX_LIGHTS];
        for (slot, light) in slots.iter_mut().zip(lights) {
            let [x, y, z] = light.position;
            let [r, g, b] = light.color;
            *slot = LightUniform {
                position: [x, y, z, light.intensity],
                color: [r, g, b, 1.0],
            };
        }

        let [r, g, b] = hex_to_rgb(ambient_rgb);
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient: [r, g, b, 1.0],
            lights: slots,
            light_count: lights.len().min(MAX_LIGHTS) as u32,
            _padding: [0; 3],
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Layout and bind group for [`GlobalUBO`]
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[binding_types::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        Self {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;

    #[test]
    fn test_layout_matches_shader_block() {
        // vec4 + mat4 + vec4 + 4 * (2 * vec4) + u32 padded to 16
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 240);
    }

    #[test]
    fn test_packs_default_lights() {
        let config = ViewerConfig::default();
        let content = GlobalUBOContent::new(
            CameraUniform::default(),
            config.ambient_color,
            &config.lights,
        );
        assert_eq!(content.light_count, 2);
        assert_eq!(content.lights[0].position, [10.0, 30.0, 15.0, 1.0]);
        assert_eq!(content.lights[1].position, [10.0, -30.0, -15.0, 1.0]);
        assert_eq!(content.lights[2], LightUniform::default());
        assert!((content.ambient[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_extra_lights_are_dropped() {
        let light = PointLight {
            position: [0.0; 3],
            color: [1.0; 3],
            intensity: 0.5,
        };
        let content = GlobalUBOContent::new(CameraUniform::default(), 0, &[light; 6]);
        assert_eq!(content.light_count, MAX_LIGHTS as u32);
    }
}
