use std::sync::Arc;

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    context::{Outcome, ViewerContext},
    control::{KeyId, KeyPhase},
    error::{Result, ViewerError},
    gfx::{camera::CameraManager, render_engine::RenderEngine},
    ui::{hud_panel, UiManager},
};

pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    context: ViewerContext,
    camera_manager: CameraManager,
    /// First fatal error seen inside the event loop, returned from `run`
    error: Option<ViewerError>,
}

impl ViewerApp {
    /// Builds the robot scene and the event loop; no window exists until `run`
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let (width, height) = config.window_size;
        let camera_manager =
            CameraManager::from_config(&config.camera, width as f32 / height.max(1) as f32);
        let context = ViewerContext::new(&config);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                context,
                camera_manager,
                error: None,
            },
        })
    }

    pub fn context(&self) -> &ViewerContext {
        &self.app_state.context
    }

    /// Runs until the window is closed or Escape is pressed
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        error!("{}", err);
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.window_size;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.window_title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
        )?;
        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let (width, height) = window_handle.inner_size().into();
        self.camera_manager.camera.resize_projection(width, height);

        let clear_color = self.config.clear_color();
        let window_clone = window_handle.clone();
        let mut renderer = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height, clear_color).await
        })?;
        renderer.upload_scene(self.context.scene());

        if self.config.show_hud {
            self.ui_manager = Some(UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            ));
        }

        info!("Window ready at {}x{}", width, height);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if self.camera_manager.process_keyboard_event(event) {
            self.request_redraw();
        }

        let Some(key) = KeyId::from_winit(&event.logical_key) else {
            return;
        };
        let phase = match event.state {
            ElementState::Pressed => KeyPhase::Pressed,
            ElementState::Released => KeyPhase::Released,
        };

        match self.context.handle_key(key, phase, event.repeat) {
            Outcome::Exit => event_loop.exit(),
            Outcome::Redraw => self.request_redraw(),
            Outcome::Unchanged => {}
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn render(&mut self) -> Result<()> {
        let (Some(render_engine), Some(window)) = (self.render_engine.as_mut(), self.window.as_ref())
        else {
            return Ok(());
        };

        render_engine.update(
            self.camera_manager.uniform(),
            self.config.ambient_color,
            &self.config.lights,
        );
        render_engine.sync_scene(self.context.scene());

        let Some(ui_manager) = self.ui_manager.as_mut() else {
            return render_engine.render_frame(self.context.scene(), None);
        };

        let context = &self.context;
        let window = window.clone();
        render_engine.render_frame(
            context.scene(),
            Some(Box::new(
                move |device: &wgpu::Device,
                      queue: &wgpu::Queue,
                      encoder: &mut wgpu::CommandEncoder,
                      view: &wgpu::TextureView| {
                    ui_manager.draw(device, queue, encoder, &window, view, |ui| {
                        hud_panel(ui, context);
                    });
                },
            )),
        )
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            // Only pointer events over the panel stop here; keys and resizes carry on
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        // Leave the mouse to the overlay while it is hovered
        if self.ui_manager.as_ref().is_some_and(UiManager::wants_mouse) {
            return;
        }

        if self.camera_manager.process_event(&event) {
            self.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.request_redraw();
    }
}
