//! # Interaction Control
//!
//! Turns key presses into changes to the scene:
//!
//! - [`input`] - Single (key, phase) → [`Action`] binding table
//! - [`selection`] - Cursor over the scene graph with highlight and axes toggling
//! - [`rotation`] - Per-part arrow-key rotations and the global reset

pub mod input;
pub mod rotation;
pub mod selection;

// Re-export main types
pub use input::{Action, InputMap, KeyId, KeyPhase};
pub use rotation::{Arrow, PartClass, RotationController};
pub use selection::Selection;
