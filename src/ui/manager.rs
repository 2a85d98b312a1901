//! ImGui integration with wgpu and winit
//!
//! Owns the imgui context, feeds it window events and renders its draw data
//! on top of the finished scene.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use log::warn;
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

/// Kind of window event, as far as routing between imgui and the viewer goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRoute {
    Keyboard,
    Pointer,
    Resize,
    Other,
}

impl EventRoute {
    pub fn of(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::KeyboardInput { .. } | WindowEvent::ModifiersChanged(_) => {
                EventRoute::Keyboard
            }
            WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => EventRoute::Pointer,
            WindowEvent::Resized(_) => EventRoute::Resize,
            _ => EventRoute::Other,
        }
    }
}

/// Whether an event imgui has already seen should also reach the viewer
///
/// The overlay is read-only, so only pointer events are held back, and only
/// while imgui owns the mouse. Keys and resizes always pass through.
pub fn reaches_viewer(route: EventRoute, mouse_captured: bool) -> bool {
    !(route == EventRoute::Pointer && mouse_captured)
}

pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    /// Sets up imgui with locked DPI scaling and the default font
    ///
    /// # Arguments
    /// * `device` - wgpu device for creating renderer resources
    /// * `queue` - wgpu queue for font texture uploads
    /// * `output_color_format` - Format of the surface the overlay draws into
    /// * `window` - Window for platform integration
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: 16.0,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    /// Feeds a window event to imgui
    ///
    /// # Arguments
    /// * `window` - Window the event belongs to
    /// * `event` - Event from the winit loop
    ///
    /// # Returns
    /// True if imgui consumed the event and the viewer should not see it
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        let Event::WindowEvent {
            event: window_event,
            ..
        } = event
        else {
            return false;
        };

        let route = EventRoute::of(window_event);
        if route == EventRoute::Other && !matches!(window_event, WindowEvent::Focused(_)) {
            return false;
        }

        self.platform
            .handle_event(self.context.io_mut(), window, event);
        !reaches_viewer(route, self.wants_mouse())
    }

    /// True while the cursor is over an imgui window
    pub fn wants_mouse(&self) -> bool {
        self.context.io().want_capture_mouse
    }

    /// Builds this frame's UI with `run_ui`
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F)
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(err) = self.platform.prepare_frame(self.context.io_mut(), window) {
            warn!("Failed to prepare UI frame: {}", err);
        }

        let ui = self.context.frame();
        run_ui(ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }
    }

    /// Renders the UI built by the last `update_logic()` over `color_attachment`
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.context.render();

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load, // Keep the scene underneath
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(err) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            warn!("Failed to render UI: {:?}", err);
        }
    }

    /// `update_logic()` followed by `render_display_only()`
    ///
    /// # Arguments
    /// * `device` - wgpu device
    /// * `queue` - wgpu queue
    /// * `encoder` - Encoder the overlay pass is recorded into
    /// * `window` - Window used for frame preparation and cursor updates
    /// * `color_attachment` - Target view, already holding the scene
    /// * `run_ui` - Builds this frame's widgets
    pub fn draw<F>(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        window: &Window,
        color_attachment: &TextureView,
        run_ui: F,
    ) where
        F: FnOnce(&imgui::Ui),
    {
        self.update_logic(window, run_ui);
        self.render_display_only(device, queue, encoder, color_attachment);
    }
}
