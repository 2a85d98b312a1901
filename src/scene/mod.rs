//! # Scene Graph
//!
//! Hierarchical node storage with cached world transforms. The viewer builds one
//! graph at startup (see [`crate::robot`]) and afterwards only mutates local
//! transforms and materials.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Arena of nodes with parent/child links and transform propagation
//! - [`SceneNode`] - A single node: name, kind, transforms, material and geometry
//! - [`transform`] - Translation and axis-rotation matrix helpers
//! - [`Material`] - Flat color plus opacity, used for highlighting and axes visibility
//!
//! ## Transform Convention
//!
//! Every refresh keeps `world = local * parent_world`; the root uses its local
//! transform as its world transform.

pub mod graph;
pub mod material;
pub mod node;
pub mod transform;

// Re-export main types
pub use graph::SceneGraph;
pub use material::Material;
pub use node::{NodeId, NodeKind, SceneNode};
pub use transform::Axis;
