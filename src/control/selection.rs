//! Keyboard-driven selection cursor over the scene graph
//!
//! The cursor moves between body parts, skipping the pivot nodes that sit
//! between a part and its children. Moving it repaints the previously selected
//! part with the base color and the new one with the highlight color.

use log::debug;

use crate::scene::{NodeId, SceneGraph};

/// Depth of the deepest node whose siblings cannot be cycled (scene = 0,
/// robot group = 1, torso = 2).
pub const SIBLING_LOCK_DEPTH: usize = 2;

/// The single selected node and the colors used to mark it
#[derive(Debug, Clone)]
pub struct Selection {
    current: NodeId,
    highlight_color: [f32; 3],
    restore_color: [f32; 3],
}

impl Selection {
    /// Starts the cursor on `start`, painting it if it is a visible part
    pub fn new(
        scene: &mut SceneGraph,
        start: NodeId,
        highlight_color: [f32; 3],
        restore_color: [f32; 3],
    ) -> Self {
        let selection = Self {
            current: start,
            highlight_color,
            restore_color,
        };
        selection.paint(scene, start, highlight_color);
        selection
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn highlight_color(&self) -> [f32; 3] {
        self.highlight_color
    }

    pub fn restore_color(&self) -> [f32; 3] {
        self.restore_color
    }

    /// Moves to the first child, passing through a pivot to the part below it.
    ///
    /// Returns false and leaves the selection alone when there is nothing below.
    pub fn descend(&mut self, scene: &mut SceneGraph) -> bool {
        let Some(mut child) = scene.first_child(self.current) else {
            return false;
        };
        if scene.node(child).is_pivot() {
            match scene.first_child(child) {
                Some(grandchild) => child = grandchild,
                None => return false,
            }
        }
        self.move_to(scene, child);
        true
    }

    /// Moves to the parent, passing through a pivot to the part above it.
    ///
    /// Never climbs onto the scene root itself.
    pub fn ascend(&mut self, scene: &mut SceneGraph) -> bool {
        let Some(mut parent) = scene.parent(self.current) else {
            return false;
        };
        if parent == scene.root() {
            return false;
        }
        if scene.node(parent).is_pivot() {
            match scene.parent(parent) {
                Some(above) => parent = above,
                None => return false,
            }
        }
        self.move_to(scene, parent);
        true
    }

    /// Selects the next child of the current parent, wrapping at the end
    pub fn next_sibling(&mut self, scene: &mut SceneGraph) -> bool {
        self.cycle_siblings(scene, 1)
    }

    /// Selects the previous child of the current parent, wrapping at the start
    pub fn previous_sibling(&mut self, scene: &mut SceneGraph) -> bool {
        self.cycle_siblings(scene, -1)
    }

    /// Makes the axes helper under the current node visible.
    ///
    /// Only the first child is considered, and only if it is a pivot.
    pub fn show_axes(&self, scene: &mut SceneGraph) -> bool {
        let Some(child) = scene.first_child(self.current) else {
            return false;
        };
        let node = scene.node_mut(child);
        if !node.is_pivot() {
            return false;
        }
        node.material.show();
        true
    }

    /// Hides every axes helper in the scene, not just the selected one's
    pub fn hide_all_axes(&self, scene: &mut SceneGraph) {
        let root = scene.root();
        scene.hide_axes(root);
    }

    fn cycle_siblings(&mut self, scene: &mut SceneGraph, step: isize) -> bool {
        if scene.depth(self.current) <= SIBLING_LOCK_DEPTH {
            return false;
        }
        let Some(parent) = scene.parent(self.current) else {
            return false;
        };

        let siblings = scene.children(parent);
        let count = siblings.len();
        if count <= 1 {
            return false;
        }
        let Some(index) = siblings.iter().position(|&id| id == self.current) else {
            return false;
        };

        let next = (index as isize + step).rem_euclid(count as isize) as usize;
        let target = siblings[next];
        self.move_to(scene, target);
        true
    }

    fn move_to(&mut self, scene: &mut SceneGraph, target: NodeId) {
        self.paint(scene, self.current, self.restore_color);
        self.paint(scene, target, self.highlight_color);
        debug!(
            "Selection: {} -> {}",
            scene.node(self.current).name,
            scene.node(target).name
        );
        self.current = target;
    }

    fn paint(&self, scene: &mut SceneGraph, id: NodeId, color: [f32; 3]) {
        let node = scene.node_mut(id);
        if node.is_renderable() {
            node.material.color = color;
        }
    }
}
