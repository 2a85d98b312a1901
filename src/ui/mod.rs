//! # User Interface Module
//!
//! A small Dear ImGui overlay showing the current selection, how the arrow
//! keys will rotate it, and the key bindings.
//!
//! - [`UiManager`] - imgui context, winit platform glue and wgpu renderer
//! - [`panel`] - the heads-up panel itself
//!
//! The overlay is read-only. It never takes keyboard focus, so every key still
//! reaches [`crate::context::ViewerContext`].

pub mod manager;
pub mod panel;

pub use manager::{reaches_viewer, EventRoute, UiManager};
pub use panel::hud_panel;
