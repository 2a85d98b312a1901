//! Articulate
//!
//! An interactive viewer for an articulated robot built from primitive shapes.
//! One body part at a time is selected from the keyboard and rotated about its
//! own pivot; rotations propagate down the hierarchy through a scene graph with
//! cached world transforms.
//!
//! The GPU-free core ([`scene`], [`robot`], [`control`], [`context`]) can be
//! driven directly:
//!
//! ```
//! use articulate::{
//!     config::ViewerConfig,
//!     context::ViewerContext,
//!     control::{KeyId, KeyPhase},
//! };
//!
//! let mut viewer = ViewerContext::new(&ViewerConfig::default());
//! viewer.handle_key(KeyId::Char('s'), KeyPhase::Pressed, false);
//! assert_eq!(viewer.selected_name(), "torso");
//! ```

pub mod app;
pub mod config;
pub mod context;
pub mod control;
pub mod error;
pub mod gfx;
pub mod robot;
pub mod scene;
pub mod ui;
pub mod wgpu_utils;

pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use context::ViewerContext;
pub use error::{Result, ViewerError};

/// Opens the viewer with the default configuration and blocks until it exits
pub fn run() -> Result<()> {
    ViewerApp::new(ViewerConfig::default())?.run()
}
