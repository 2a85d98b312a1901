//! # Robot Model
//!
//! Builds the articulated figure: a torso carrying legs, arms and a head, with
//! feet hanging off the legs. Every body part owns an invisible pivot node as its
//! first child; distal parts hang off those pivots so a limb can be rotated
//! without dragging its attachment point along.
//!
//! ```text
//! Robot
//! └── torso
//!     └── torso pivot
//!         ├── left leg ── left leg pivot ── left foot ── left foot pivot
//!         ├── right leg ── right leg pivot ── right foot ── right foot pivot
//!         ├── left arm ── left arm pivot
//!         ├── right arm ── right arm pivot
//!         └── head ── head pivot
//! ```

use log::info;

use crate::{
    gfx::geometry::{generate_axes, generate_box, generate_sphere, Geometry},
    scene::{Material, NodeId, SceneGraph, SceneNode},
};

/// Name of the group node every part hangs under
pub const ROBOT_NAME: &str = "Robot";

/// The body parts of the figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Torso,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    LeftFoot,
    RightFoot,
}

impl Part {
    pub const ALL: [Part; 8] = [
        Part::Torso,
        Part::Head,
        Part::LeftArm,
        Part::RightArm,
        Part::LeftLeg,
        Part::RightLeg,
        Part::LeftFoot,
        Part::RightFoot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Part::Torso => "torso",
            Part::Head => "head",
            Part::LeftArm => "left arm",
            Part::RightArm => "right arm",
            Part::LeftLeg => "left leg",
            Part::RightLeg => "right leg",
            Part::LeftFoot => "left foot",
            Part::RightFoot => "right foot",
        }
    }

    fn geometry(self) -> Geometry {
        match self {
            Part::Head => Geometry::Surface(generate_sphere(0.3, 30, 30)),
            Part::Torso => Geometry::Surface(generate_box(0.6, 1.0, 0.4)),
            Part::LeftLeg | Part::RightLeg => Geometry::Surface(generate_box(0.2, 0.8, 0.3)),
            Part::LeftArm | Part::RightArm => Geometry::Surface(generate_box(0.8, 0.2, 0.3)),
            Part::LeftFoot | Part::RightFoot => Geometry::Surface(generate_box(0.2, 0.15, 0.2)),
        }
    }

    /// Offset baked into the vertex data so the mesh hangs off its pivot
    fn geometry_offset(self) -> Option<[f32; 3]> {
        match self {
            Part::LeftLeg => Some([-0.2, -1.0, 0.0]),
            Part::RightLeg => Some([0.2, -1.0, 0.0]),
            Part::LeftArm => Some([-0.4, 0.0, 0.0]),
            Part::RightArm => Some([0.4, 0.0, 0.0]),
            Part::Head => Some([0.0, 0.4, 0.0]),
            _ => None,
        }
    }

    /// Local position assigned at construction time
    fn initial_position(self) -> Option<[f32; 3]> {
        match self {
            Part::LeftFoot => Some([-0.2, -1.33, 0.25]),
            Part::RightFoot => Some([0.2, -1.33, 0.25]),
            Part::Head => Some([0.0, 0.5, 0.0]),
            Part::LeftArm => Some([-0.4, 0.4, 0.0]),
            Part::RightArm => Some([0.4, 0.4, 0.0]),
            _ => None,
        }
    }

    fn axes_size(self) -> f32 {
        match self {
            Part::Torso => 1.0,
            _ => 0.5,
        }
    }

    fn axes_offset(self) -> Option<[f32; 3]> {
        match self {
            Part::LeftLeg => Some([-0.2, -0.6, 0.0]),
            Part::RightLeg => Some([0.2, -0.6, 0.0]),
            _ => None,
        }
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Handles to the nodes of a built robot
#[derive(Debug, Clone)]
pub struct RobotModel {
    robot: NodeId,
    parts: Vec<(Part, NodeId)>,
    pivots: Vec<(Part, NodeId)>,
}

impl RobotModel {
    /// Builds the robot under `scene`'s root and seeds every world transform.
    ///
    /// All parts share `material`.
    pub fn build(scene: &mut SceneGraph, material: Material) -> Self {
        let robot = scene.insert(SceneNode::group(ROBOT_NAME));
        let root = scene.root();
        scene.add_child(root, robot);

        // Parts, with their mesh offsets baked in
        let mut parts = Vec::with_capacity(Part::ALL.len());
        for part in Part::ALL {
            let mut geometry = part.geometry();
            if let Some(offset) = part.geometry_offset() {
                geometry.translate(offset);
            }
            let id = scene.insert(SceneNode::part(part.name(), geometry, material));
            parts.push((part, id));
        }

        let mut model = Self {
            robot,
            parts,
            pivots: Vec::with_capacity(Part::ALL.len()),
        };

        for part in Part::ALL {
            if let Some([x, y, z]) = part.initial_position() {
                scene.set_local_position(model.part(part), x, y, z);
            }
        }

        // One hidden axes pivot per part
        for part in Part::ALL {
            let mut axes = Geometry::Lines(generate_axes(part.axes_size()));
            if let Some(offset) = part.axes_offset() {
                axes.translate(offset);
            }
            let pivot = scene.insert(SceneNode::pivot(&format!("{} pivot", part.name()), axes));
            scene.add_child(model.part(part), pivot);
            model.pivots.push((part, pivot));
        }

        // Assemble
        scene.add_child(robot, model.part(Part::Torso));
        for part in [
            Part::LeftLeg,
            Part::RightLeg,
            Part::LeftArm,
            Part::RightArm,
            Part::Head,
        ] {
            scene.add_child(model.pivot(Part::Torso), model.part(part));
        }
        scene.add_child(model.pivot(Part::LeftLeg), model.part(Part::LeftFoot));
        scene.add_child(model.pivot(Part::RightLeg), model.part(Part::RightFoot));

        let refreshed = scene.refresh_all();
        info!(
            "Built robot with {} parts and {} pivots ({} nodes refreshed)",
            model.parts.len(),
            model.pivots.len(),
            refreshed
        );
        scene.print_graph();

        model
    }

    /// The group node every part hangs under
    pub fn root(&self) -> NodeId {
        self.robot
    }

    pub fn part(&self, part: Part) -> NodeId {
        Self::lookup(&self.parts, part)
    }

    pub fn pivot(&self, part: Part) -> NodeId {
        Self::lookup(&self.pivots, part)
    }

    /// Which body part `id` is, if any
    pub fn part_of(&self, id: NodeId) -> Option<Part> {
        self.parts
            .iter()
            .find(|(_, node)| *node == id)
            .map(|(part, _)| *part)
    }

    pub fn parts(&self) -> impl Iterator<Item = (Part, NodeId)> + '_ {
        self.parts.iter().copied()
    }

    pub fn pivots(&self) -> impl Iterator<Item = (Part, NodeId)> + '_ {
        self.pivots.iter().copied()
    }

    fn lookup(table: &[(Part, NodeId)], part: Part) -> NodeId {
        table
            .iter()
            .find(|(p, _)| *p == part)
            .map(|(_, id)| *id)
            .unwrap_or_else(|| panic!("robot has no node for {}", part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::transform::tests::assert_matrix_eq;
    use crate::scene::transform::translation;
    use crate::scene::NodeKind;
    use cgmath::SquareMatrix;

    fn build() -> (SceneGraph, RobotModel) {
        let mut scene = SceneGraph::new("scene");
        let robot = RobotModel::build(&mut scene, Material::from_hex(0xFF3333));
        (scene, robot)
    }

    #[test]
    fn test_node_counts() {
        let (scene, robot) = build();
        // scene + Robot + 8 parts + 8 pivots
        assert_eq!(scene.len(), 18);
        assert_eq!(robot.parts().count(), 8);
        assert_eq!(robot.pivots().count(), 8);
        assert_eq!(scene.children(scene.root()), &[robot.root()]);
        assert_eq!(scene.node(robot.root()).name, ROBOT_NAME);
        assert_eq!(scene.node(robot.root()).kind, NodeKind::Group);
    }

    #[test]
    fn test_hierarchy() {
        let (scene, robot) = build();
        assert_eq!(scene.children(robot.root()), &[robot.part(Part::Torso)]);

        let torso_pivot = robot.pivot(Part::Torso);
        assert_eq!(scene.children(robot.part(Part::Torso)), &[torso_pivot]);
        assert_eq!(
            scene.children(torso_pivot),
            &[
                robot.part(Part::LeftLeg),
                robot.part(Part::RightLeg),
                robot.part(Part::LeftArm),
                robot.part(Part::RightArm),
                robot.part(Part::Head),
            ]
        );
        assert_eq!(
            scene.children(robot.pivot(Part::LeftLeg)),
            &[robot.part(Part::LeftFoot)]
        );
        assert_eq!(
            scene.children(robot.pivot(Part::RightLeg)),
            &[robot.part(Part::RightFoot)]
        );
        assert!(scene.children(robot.pivot(Part::Head)).is_empty());
        assert!(scene.children(robot.pivot(Part::LeftFoot)).is_empty());
    }

    #[test]
    fn test_every_part_starts_with_its_pivot() {
        let (scene, robot) = build();
        for (part, id) in robot.parts() {
            assert_eq!(scene.first_child(id), Some(robot.pivot(part)), "{}", part);
            assert!(scene.node(robot.pivot(part)).is_pivot());
            assert!(scene.node(robot.pivot(part)).material.is_hidden());
            assert!(scene.node(id).is_renderable());
        }
    }

    #[test]
    fn test_initial_positions() {
        let (scene, robot) = build();
        assert_matrix_eq(
            &scene.node(robot.part(Part::Head)).local_transform,
            &translation(0.0, 0.5, 0.0),
        );
        assert_matrix_eq(
            &scene.node(robot.part(Part::LeftFoot)).local_transform,
            &translation(-0.2, -1.33, 0.25),
        );
        assert_matrix_eq(
            &scene.node(robot.part(Part::RightArm)).local_transform,
            &translation(0.4, 0.4, 0.0),
        );
        assert_matrix_eq(
            &scene.node(robot.part(Part::LeftLeg)).local_transform,
            &cgmath::Matrix4::identity(),
        );
    }

    #[test]
    fn test_world_transforms_are_seeded() {
        let (scene, robot) = build();
        // Only translations so far, so the foot's world is its own offset.
        assert_matrix_eq(
            &scene.node(robot.part(Part::RightFoot)).world_transform(),
            &translation(0.2, -1.33, 0.25),
        );
        for (id, node) in scene.iter() {
            let expected = match scene.parent_world(id) {
                Some(parent_world) => node.local_transform * parent_world,
                None => node.local_transform,
            };
            assert_matrix_eq(&node.world_transform(), &expected);
        }
    }

    #[test]
    fn test_offsets_live_in_geometry() {
        let (scene, robot) = build();
        let bounds = |part: Part| {
            scene
                .node(robot.part(part))
                .geometry
                .as_ref()
                .and_then(|g| g.bounds())
                .unwrap()
        };
        let (min, max) = bounds(Part::LeftLeg);
        assert!((min[1] + 1.4).abs() < 1e-5 && (max[1] + 0.6).abs() < 1e-5);
        let (min, max) = bounds(Part::Head);
        assert!((min[1] - 0.1).abs() < 1e-5 && (max[1] - 0.7).abs() < 1e-5);

        let leg_axes = scene.node(robot.pivot(Part::RightLeg)).geometry.as_ref().unwrap();
        assert_eq!(leg_axes.vertices()[0], [0.2, -0.6, 0.0]);
    }

    #[test]
    fn test_part_lookup() {
        let (scene, robot) = build();
        for part in Part::ALL {
            let id = robot.part(part);
            assert_eq!(robot.part_of(id), Some(part));
            assert_eq!(scene.node(id).name, part.name());
        }
        assert_eq!(robot.part_of(robot.root()), None);
        assert_eq!(robot.part_of(robot.pivot(Part::Head)), None);
    }
}
