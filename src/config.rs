//! Viewer configuration
//!
//! Every tunable the viewer reads at startup, with defaults matching the stock
//! robot scene. Adjust through the `with_*` builders:
//!
//! ```
//! use articulate::config::ViewerConfig;
//!
//! let config = ViewerConfig::default()
//!     .with_title("Puppet")
//!     .with_rotation_step(5.0)
//!     .with_hud(false);
//! assert_eq!(config.rotation_step_degrees, 5.0);
//! ```

use crate::scene::material::hex_to_rgb;

/// Point light as uploaded to the shaders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Orbit camera settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Initial distance from the target
    pub distance: f32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians of orbit per pixel of mouse drag
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 3.0,
            fov_degrees: 70.0,
            znear: 0.01,
            zfar: 10.0,
            min_distance: 0.1,
            max_distance: 5.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_size: (u32, u32),
    /// Color shared by every body part, `0xRRGGBB`
    pub base_color: u32,
    /// Color of the selected part, `0xRRGGBB`
    pub highlight_color: u32,
    pub background_color: u32,
    pub ambient_color: u32,
    pub lights: Vec<PointLight>,
    /// Degrees applied per arrow key event
    pub rotation_step_degrees: f32,
    pub camera: CameraConfig,
    /// Draw the selection/controls overlay
    pub show_hud: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let warm_white = hex_to_rgb(0xFFFFCC);
        Self {
            window_title: "Robot".to_string(),
            window_size: (1200, 800),
            base_color: 0xFF3333,
            highlight_color: 0xFFFF00,
            background_color: 0x87CEEB,
            ambient_color: 0x999999,
            lights: vec![
                PointLight {
                    position: [10.0, 30.0, 15.0],
                    color: warm_white,
                    intensity: 1.0,
                },
                PointLight {
                    position: [10.0, -30.0, -15.0],
                    color: warm_white,
                    intensity: 1.0,
                },
            ],
            rotation_step_degrees: 1.0,
            camera: CameraConfig::default(),
            show_hud: true,
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.window_title = title.to_string();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_base_color(mut self, rgb: u32) -> Self {
        self.base_color = rgb;
        self
    }

    pub fn with_highlight_color(mut self, rgb: u32) -> Self {
        self.highlight_color = rgb;
        self
    }

    pub fn with_background_color(mut self, rgb: u32) -> Self {
        self.background_color = rgb;
        self
    }

    pub fn with_lights(mut self, lights: Vec<PointLight>) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_rotation_step(mut self, degrees: f32) -> Self {
        self.rotation_step_degrees = degrees;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_hud(mut self, show: bool) -> Self {
        self.show_hud = show;
        self
    }

    /// Background as a wgpu clear color
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = hex_to_rgb(self.background_color);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}
