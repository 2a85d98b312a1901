use log::debug;
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Mouse orbit controls: drag to rotate, shift-drag to pan, wheel to zoom
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Applies a raw device event to `camera`, returning true if it moved
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / 20.0
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_shift_held {
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    /// Tracks shift for panning; Home puts the camera back where it started
    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) -> bool {
        match event.physical_key {
            PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight) => {
                self.set_shift(event.state == ElementState::Pressed);
                false
            }
            PhysicalKey::Code(KeyCode::Home) if event.state == ElementState::Pressed => {
                debug!("Resetting camera");
                camera.reset_to_default();
                true
            }
            _ => false,
        }
    }

    fn set_shift(&mut self, held: bool) {
        if held != self.is_shift_held {
            debug!("Shift held: {}", held);
        }
        self.is_shift_held = held;
    }

    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held
    }

    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn setup() -> (CameraController, OrbitCamera) {
        let config = CameraConfig::default();
        (
            CameraController::new(config.rotate_speed, config.zoom_speed),
            OrbitCamera::from_config(&config, 1.0),
        )
    }

    fn press(controller: &mut CameraController, camera: &mut OrbitCamera) {
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            camera,
        );
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let (mut controller, mut camera) = setup();
        let moved = controller.process_events(
            &DeviceEvent::MouseMotion { delta: (10.0, 0.0) },
            &mut camera,
        );
        assert!(!moved);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_drag_orbits() {
        let (mut controller, mut camera) = setup();
        press(&mut controller, &mut camera);
        assert!(controller.is_rotating());
        let moved = controller.process_events(
            &DeviceEvent::MouseMotion { delta: (100.0, 0.0) },
            &mut camera,
        );
        assert!(moved);
        assert!((camera.yaw + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shift_drag_pans() {
        let (mut controller, mut camera) = setup();
        controller.set_shift(true);
        press(&mut controller, &mut camera);
        assert!(controller.is_panning());
        controller.process_events(
            &DeviceEvent::MouseMotion { delta: (0.0, 50.0) },
            &mut camera,
        );
        assert_eq!(camera.yaw, 0.0);
        assert!(camera.target.y > 0.0);
    }

    #[test]
    fn test_wheel_zooms_within_bounds() {
        let (mut controller, mut camera) = setup();
        for _ in 0..100 {
            controller.process_events(
                &DeviceEvent::MouseWheel {
                    delta: MouseScrollDelta::LineDelta(0.0, -1.0),
                },
                &mut camera,
            );
        }
        assert_eq!(camera.distance, 5.0);
        for _ in 0..200 {
            controller.process_events(
                &DeviceEvent::MouseWheel {
                    delta: MouseScrollDelta::LineDelta(0.0, 1.0),
                },
                &mut camera,
            );
        }
        assert_eq!(camera.distance, 0.1);
    }
}
