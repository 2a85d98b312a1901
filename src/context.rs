//! Viewer state shared by every key handler
//!
//! [`ViewerContext`] owns the scene graph, the robot built into it, the
//! selection cursor, the rotation controller and the binding table. Window
//! events are reduced to `(KeyId, KeyPhase, repeat)` before they get here, so
//! everything in this module runs without a GPU.

use log::{debug, info};

use crate::{
    config::ViewerConfig,
    control::{Action, InputMap, KeyId, KeyPhase, PartClass, RotationController, Selection},
    robot::RobotModel,
    scene::{material::hex_to_rgb, Material, NodeId, SceneGraph},
};

/// What the application loop should do after a key has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed
    Unchanged,
    /// Transforms or materials changed; upload and redraw
    Redraw,
    /// The user asked to quit
    Exit,
}

pub struct ViewerContext {
    scene: SceneGraph,
    robot: RobotModel,
    selection: Selection,
    rotation: RotationController,
    input: InputMap,
}

impl ViewerContext {
    /// Builds the robot scene and puts the cursor on the robot group
    pub fn new(config: &ViewerConfig) -> Self {
        let mut scene = SceneGraph::new("Scene");
        let robot = RobotModel::build(&mut scene, Material::from_hex(config.base_color));
        let selection = Selection::new(
            &mut scene,
            robot.root(),
            hex_to_rgb(config.highlight_color),
            hex_to_rgb(config.base_color),
        );

        info!(
            "Viewer ready: {} nodes, {}° per rotation step",
            scene.len(),
            config.rotation_step_degrees
        );

        Self {
            scene,
            robot,
            selection,
            rotation: RotationController::new(config.rotation_step_degrees),
            input: InputMap::default(),
        }
    }

    /// Replaces the binding table
    pub fn with_input_map(mut self, input: InputMap) -> Self {
        self.input = input;
        self
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn robot(&self) -> &RobotModel {
        &self.robot
    }

    pub fn input_map(&self) -> &InputMap {
        &self.input
    }

    pub fn selected(&self) -> NodeId {
        self.selection.current()
    }

    pub fn selected_name(&self) -> &str {
        &self.scene.node(self.selection.current()).name
    }

    /// Rotation class the arrow keys currently act with
    pub fn selected_class(&self) -> PartClass {
        PartClass::of(self.robot.part_of(self.selection.current()))
    }

    /// Resolves a key event through the binding table and performs the action
    pub fn handle_key(&mut self, key: KeyId, phase: KeyPhase, is_repeat: bool) -> Outcome {
        match self.input.resolve(key, phase, is_repeat) {
            Some(action) => {
                debug!("{} {:?} -> {:?}", key, phase, action);
                self.perform(action)
            }
            None => Outcome::Unchanged,
        }
    }

    pub fn perform(&mut self, action: Action) -> Outcome {
        let changed = match action {
            Action::Descend => self.selection.descend(&mut self.scene),
            Action::Ascend => self.selection.ascend(&mut self.scene),
            Action::NextSibling => self.selection.next_sibling(&mut self.scene),
            Action::PreviousSibling => self.selection.previous_sibling(&mut self.scene),
            Action::ShowAxes => self.selection.show_axes(&mut self.scene),
            Action::HideAllAxes => {
                self.selection.hide_all_axes(&mut self.scene);
                true
            }
            Action::Rotate(arrow) => {
                let target = self.selection.current();
                self.rotation
                    .rotate(&mut self.scene, &self.robot, target, arrow);
                true
            }
            Action::ResetRoot => {
                self.rotation.reset(&mut self.scene, &self.robot);
                true
            }
            Action::Exit => return Outcome::Exit,
        };

        if changed {
            Outcome::Redraw
        } else {
            Outcome::Unchanged
        }
    }
}
