//! # Graphics Module
//!
//! Everything between the scene graph and the window surface.
//!
//! - **Camera** ([`camera`]) - Y-up orbit camera driven by the mouse
//! - **Geometry** ([`geometry`]) - Procedural boxes, spheres and axes lines
//! - **Objects** ([`object`]) - Per-node GPU buffers mirroring the scene graph
//! - **Resources** ([`resources`]) - Global uniforms and the depth buffer
//! - **Render Engine** ([`RenderEngine`]) - Surface setup and the two scene pipelines
//!
//! The engine never decides what is visible on its own: it reads world
//! transforms and materials straight from [`crate::scene::SceneGraph`] each
//! frame, skipping nodes whose material is hidden.

pub mod camera;
pub mod geometry;
pub mod object;
pub mod render_engine;
pub mod resources;
pub mod vertex;

pub use camera::OrbitCamera;
pub use render_engine::RenderEngine;
