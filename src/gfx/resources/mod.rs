//! GPU resources shared by every draw: global uniforms and the depth buffer

pub mod global_bindings;
pub mod texture_resource;

pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent, MAX_LIGHTS};
pub use texture_resource::TextureResource;
