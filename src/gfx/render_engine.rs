use std::{iter, sync::Arc};

use log::{debug, info, warn};
use wgpu::{DepthStencilState, RenderPipeline, TextureFormat};

use super::{
    camera::camera_utils::CameraUniform,
    object::{node_bind_group_layout, DrawObject, NodeObject, Topology},
    resources::{GlobalBindings, GlobalUBO, GlobalUBOContent, TextureResource},
    vertex::{LineVertex, Vertex3D},
};
use crate::{
    config::PointLight,
    error::{Result, ViewerError},
    scene::SceneGraph,
};

/// Callback drawing an overlay into the frame after the scene
pub type OverlayFn<'a> =
    dyn FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView) + 'a;

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    clear_color: wgpu::Color,

    mesh_pipeline: RenderPipeline,
    line_pipeline: RenderPipeline,

    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    node_layout: wgpu::BindGroupLayout,
    objects: Vec<NodeObject>,
}

struct PipelineDesc<'a> {
    label: &'a str,
    vs_entry: &'a str,
    fs_entry: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    depth_write: bool,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`
    ///
    /// Picks a non-sRGB surface format when one exists, then builds the lit
    /// mesh pipeline and the unlit line pipeline over a shared depth buffer.
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `clear_color` - Background color for every frame
    ///
    /// # Returns
    /// Configured engine with no uploaded nodes, or the adapter, device or
    /// surface error that stopped initialization
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: wgpu::Color,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let Some(&first_format) = surface_capabilities.formats.first() else {
            return Err(ViewerError::UnsupportedSurface(adapter.get_info().name));
        };
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(first_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: surface_capabilities
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let node_layout = node_bind_group_layout(&device);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[global_bindings.bind_group_layout(), &node_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = Self::create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineDesc {
                label: "Mesh Pipeline",
                vs_entry: "vs_main",
                fs_entry: "fs_main",
                buffers: &[Vertex3D::desc()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: true,
            },
        );
        let line_pipeline = Self::create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineDesc {
                label: "Line Pipeline",
                vs_entry: "vs_line",
                fs_entry: "fs_line",
                buffers: &[LineVertex::desc()],
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: false,
            },
        );

        Ok(RenderEngine {
            device: device.into(),
            queue: queue.into(),
            config,
            format,
            surface,
            depth_texture,
            clear_color,
            mesh_pipeline,
            line_pipeline,
            global_ubo,
            global_bindings,
            node_layout,
            objects: Vec::new(),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: TextureFormat,
        desc: PipelineDesc,
    ) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(desc.vs_entry),
                buffers: desc.buffers,
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: desc.depth_write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(desc.fs_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }

    /// Creates GPU objects for every node with geometry.
    ///
    /// The graph's structure is fixed after construction, so this runs once.
    pub fn upload_scene(&mut self, scene: &SceneGraph) {
        self.objects = scene
            .iter()
            .filter_map(|(id, node)| NodeObject::new(&self.device, &self.node_layout, id, node))
            .collect();
        info!("Uploaded {} drawable nodes", self.objects.len());
    }

    /// Copies world transforms and colors into the node uniforms
    ///
    /// # Arguments
    /// * `scene` - Graph the uploaded nodes were created from
    ///
    /// # Returns
    /// Number of node uniforms that changed and were written to the queue
    pub fn sync_scene(&mut self, scene: &SceneGraph) -> usize {
        let mut written = 0;
        for object in self.objects.iter_mut() {
            if let Some(node) = scene.get(object.node) {
                if object.update(&self.queue, node) {
                    written += 1;
                }
            }
        }
        if written > 0 {
            debug!("Synced {} node uniforms", written);
        }
        written
    }

    /// Updates the camera and lighting uniform block
    ///
    /// # Arguments
    /// * `camera_uniform` - Current view-projection and eye position
    /// * `ambient_rgb` - Ambient light color as `0xRRGGBB`
    /// * `lights` - Point lights; only the first four are used
    pub fn update(&mut self, camera_uniform: CameraUniform, ambient_rgb: u32, lights: &[PointLight]) {
        let content = GlobalUBOContent::new(camera_uniform, ambient_rgb, lights);
        self.global_ubo.update_content(&self.queue, content);
    }

    /// Draws the scene, then the overlay if one is given.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped; only
    /// running out of memory is reported as an error.
    ///
    /// # Arguments
    /// * `scene` - Graph whose visible nodes are drawn
    /// * `overlay` - Optional callback recording UI passes after the scene
    pub fn render_frame(
        &mut self,
        scene: &SceneGraph,
        overlay: Option<Box<OverlayFn<'_>>>,
    ) -> Result<()> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.resize(self.config.width, self.config.height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(ViewerError::OutOfMemory),
            Err(err) => {
                warn!("Skipping frame: {}", err);
                return Ok(());
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            // Opaque surfaces first so the axes blend over them
            render_pass.set_pipeline(&self.mesh_pipeline);
            for object in self.drawable(scene, Topology::Triangles) {
                render_pass.draw_object(object);
            }

            render_pass.set_pipeline(&self.line_pipeline);
            for object in self.drawable(scene, Topology::Lines) {
                render_pass.draw_object(object);
            }
        }

        if let Some(overlay) = overlay {
            overlay(&self.device, &self.queue, &mut encoder, &surface_texture_view);
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn drawable<'s>(
        &'s self,
        scene: &'s SceneGraph,
        topology: Topology,
    ) -> impl Iterator<Item = &'s NodeObject> + 's {
        self.objects.iter().filter(move |object| {
            object.mesh.topology == topology
                && scene
                    .get(object.node)
                    .is_some_and(|node| !node.material.is_hidden())
        })
    }

    /// Reconfigures the surface and depth buffer; zero sizes are ignored
    ///
    /// # Arguments
    /// * `width` - New surface width in pixels
    /// * `height` - New surface height in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
