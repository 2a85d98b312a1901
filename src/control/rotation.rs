//! Arrow-key rotation of the selected node, and the global reset

use log::debug;

use crate::{
    robot::{Part, RobotModel},
    scene::{Axis, NodeId, SceneGraph},
};

/// Arrow key directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// Groups of nodes sharing the same arrow-to-axis mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartClass {
    /// Torso, legs, feet and the robot group itself
    Default,
    LeftArm,
    RightArm,
    Head,
}

impl PartClass {
    pub fn of(part: Option<Part>) -> Self {
        match part {
            Some(Part::LeftArm) => PartClass::LeftArm,
            Some(Part::RightArm) => PartClass::RightArm,
            Some(Part::Head) => PartClass::Head,
            _ => PartClass::Default,
        }
    }

    /// Axis and sign (+1 or -1) an arrow key produces for this class.
    ///
    /// | class     | Up   | Down | Left | Right |
    /// |-----------|------|------|------|-------|
    /// | default   | X,+1 | X,-1 | Y,-1 | Y,+1  |
    /// | left arm  | Z,+1 | Z,-1 | Y,-1 | Y,+1  |
    /// | right arm | Z,-1 | Z,+1 | Y,-1 | Y,+1  |
    /// | head      | X,+1 | X,-1 | Z,+1 | Z,-1  |
    pub fn rotation_for(self, arrow: Arrow) -> (Axis, f32) {
        match (self, arrow) {
            (PartClass::LeftArm, Arrow::Up) => (Axis::Z, 1.0),
            (PartClass::LeftArm, Arrow::Down) => (Axis::Z, -1.0),
            (PartClass::RightArm, Arrow::Up) => (Axis::Z, -1.0),
            (PartClass::RightArm, Arrow::Down) => (Axis::Z, 1.0),
            (PartClass::Head, Arrow::Left) => (Axis::Z, 1.0),
            (PartClass::Head, Arrow::Right) => (Axis::Z, -1.0),
            (_, Arrow::Up) => (Axis::X, 1.0),
            (_, Arrow::Down) => (Axis::X, -1.0),
            (_, Arrow::Left) => (Axis::Y, -1.0),
            (_, Arrow::Right) => (Axis::Y, 1.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PartClass::Default => "default",
            PartClass::LeftArm => "left arm",
            PartClass::RightArm => "right arm",
            PartClass::Head => "head",
        }
    }
}

/// Applies fixed-size rotations to whatever node it is pointed at
#[derive(Debug, Clone, Copy)]
pub struct RotationController {
    step_degrees: f32,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RotationController {
    pub fn new(step_degrees: f32) -> Self {
        Self { step_degrees }
    }

    pub fn step_degrees(&self) -> f32 {
        self.step_degrees
    }

    /// Rotates `target` (and, through propagation, its subtree) one step in
    /// the direction `arrow` maps to for the target's part class.
    ///
    /// Returns the axis and signed angle that were applied.
    pub fn rotate(
        &self,
        scene: &mut SceneGraph,
        robot: &RobotModel,
        target: NodeId,
        arrow: Arrow,
    ) -> (Axis, f32) {
        let class = PartClass::of(robot.part_of(target));
        let (axis, sign) = class.rotation_for(arrow);
        let angle = sign * self.step_degrees;

        scene.apply_incremental_rotation(target, axis, angle);
        debug!(
            "Rotated {} ({}) about {} by {}°",
            scene.node(target).name,
            class.label(),
            axis,
            angle
        );
        (axis, angle)
    }

    /// Puts the robot group back at the origin.
    ///
    /// Rotations accumulated on individual parts are kept; only the robot's own
    /// local transform is replaced.
    pub fn reset(&self, scene: &mut SceneGraph, robot: &RobotModel) {
        scene.set_local_position(robot.root(), 0.0, 0.0, 0.0);
        let refreshed = scene.refresh_all();
        debug!("Reset robot root ({} nodes refreshed)", refreshed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::transform::tests::assert_matrix_eq;
    use crate::scene::transform::{compose_rotation, identity};
    use crate::scene::Material;

    fn build() -> (SceneGraph, RobotModel) {
        let mut scene = SceneGraph::new("scene");
        let robot = RobotModel::build(&mut scene, Material::from_hex(0xFF3333));
        (scene, robot)
    }

    #[test]
    fn test_rotation_table() {
        use Arrow::*;
        let table = [
            (PartClass::Default, [(Axis::X, 1.0), (Axis::X, -1.0), (Axis::Y, -1.0), (Axis::Y, 1.0)]),
            (PartClass::LeftArm, [(Axis::Z, 1.0), (Axis::Z, -1.0), (Axis::Y, -1.0), (Axis::Y, 1.0)]),
            (PartClass::RightArm, [(Axis::Z, -1.0), (Axis::Z, 1.0), (Axis::Y, -1.0), (Axis::Y, 1.0)]),
            (PartClass::Head, [(Axis::X, 1.0), (Axis::X, -1.0), (Axis::Z, 1.0), (Axis::Z, -1.0)]),
        ];
        for (class, expected) in table {
            for (arrow, want) in [Up, Down, Left, Right].into_iter().zip(expected) {
                assert_eq!(class.rotation_for(arrow), want, "{:?} {:?}", class, arrow);
            }
        }
    }

    #[test]
    fn test_part_classes() {
        assert_eq!(PartClass::of(Some(Part::LeftArm)), PartClass::LeftArm);
        assert_eq!(PartClass::of(Some(Part::RightArm)), PartClass::RightArm);
        assert_eq!(PartClass::of(Some(Part::Head)), PartClass::Head);
        assert_eq!(PartClass::of(Some(Part::LeftFoot)), PartClass::Default);
        assert_eq!(PartClass::of(Some(Part::Torso)), PartClass::Default);
        assert_eq!(PartClass::of(None), PartClass::Default);
    }

    #[test]
    fn test_rotate_applies_one_step() {
        let (mut scene, robot) = build();
        let controller = RotationController::default();
        let arm = robot.part(Part::RightArm);
        let before = scene.node(arm).local_transform;

        let applied = controller.rotate(&mut scene, &robot, arm, Arrow::Up);

        assert_eq!(applied, (Axis::Z, -1.0));
        assert_matrix_eq(
            &scene.node(arm).local_transform,
            &(before * compose_rotation(Axis::Z, -1.0)),
        );
    }

    #[test]
    fn test_rotate_carries_subtree() {
        let (mut scene, robot) = build();
        let controller = RotationController::new(2.0);
        let leg = robot.part(Part::LeftLeg);
        let foot = robot.part(Part::LeftFoot);
        let foot_before = scene.node(foot).local_transform;

        controller.rotate(&mut scene, &robot, leg, Arrow::Left);

        assert_matrix_eq(
            &scene.node(foot).local_transform,
            &(foot_before * compose_rotation(Axis::Y, -2.0)),
        );
        let expected_world = scene.node(foot).local_transform
            * scene.parent_world(foot).unwrap();
        assert_matrix_eq(&scene.node(foot).world_transform(), &expected_world);
        // The sibling leg is untouched
        assert_matrix_eq(
            &scene.node(robot.part(Part::RightLeg)).local_transform,
            &identity(),
        );
    }

    #[test]
    fn test_held_key_compounds() {
        let (mut scene, robot) = build();
        let controller = RotationController::default();
        let head = robot.part(Part::Head);
        let before = scene.node(head).local_transform;
        for _ in 0..5 {
            controller.rotate(&mut scene, &robot, head, Arrow::Right);
        }
        assert_matrix_eq(
            &scene.node(head).local_transform,
            &(before * compose_rotation(Axis::Z, -5.0)),
        );
    }

    #[test]
    fn test_reset_is_idempotent_and_keeps_part_rotations() {
        let (mut scene, robot) = build();
        let controller = RotationController::default();
        controller.rotate(&mut scene, &robot, robot.root(), Arrow::Up);
        controller.rotate(&mut scene, &robot, robot.part(Part::Head), Arrow::Up);
        let head_local = scene.node(robot.part(Part::Head)).local_transform;

        controller.reset(&mut scene, &robot);
        assert_matrix_eq(&scene.node(robot.root()).local_transform, &identity());
        controller.reset(&mut scene, &robot);
        assert_matrix_eq(&scene.node(robot.root()).local_transform, &identity());

        assert_matrix_eq(&scene.node(robot.part(Part::Head)).local_transform, &head_local);
        for (id, node) in scene.iter() {
            let expected = match scene.parent_world(id) {
                Some(parent_world) => node.local_transform * parent_world,
                None => node.local_transform,
            };
            assert_matrix_eq(&node.world_transform(), &expected);
        }
    }
}
