use cgmath::Matrix4;
use log::debug;

use super::{
    node::{NodeId, NodeKind, SceneNode},
    transform::{self, Axis},
};

/// Arena-backed scene graph.
///
/// Nodes own their children through ordered id lists; the parent link is a
/// plain id that only [`SceneGraph::add_child`] writes. World transforms are
/// cached per node and follow `world = local * parent_world`.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: NodeId,
}

impl SceneGraph {
    /// Creates a graph holding only the root container
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![SceneNode::root(root_name)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a detached node and returns its handle
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` to `parent`'s children, detaching it from any previous
    /// parent first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(parent != child, "a node cannot be its own child");
        debug_assert!(
            !self.is_ancestor(child, parent),
            "re-parenting {:?} under {:?} would create a cycle",
            child,
            parent
        );

        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Inserts `node` and attaches it under `parent` in one step
    pub fn attach(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let id = self.insert(node);
        self.add_child(parent, id);
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.first().copied()
    }

    /// Number of edges between `id` and the top of its tree
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent(id);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.parent(parent);
        }
        depth
    }

    /// First node with the given name, in insertion order
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = self.parent(id);
        while let Some(parent) = cursor {
            if parent == ancestor {
                return true;
            }
            cursor = self.parent(parent);
        }
        false
    }

    /// `id` followed by all of its descendants, depth-first pre-order
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            // Reverse so the first child is visited first.
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        order
    }

    /// All node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// World transform of `id`'s parent, or `None` at the top of the tree
    pub fn parent_world(&self, id: NodeId) -> Option<Matrix4<f32>> {
        self.parent(id).map(|parent| self.nodes[parent.0].world_transform)
    }

    // Transform propagation

    /// Recomputes world transforms for `id` and everything below it.
    ///
    /// `world = local * parent_world`, or `world = local` when no parent
    /// transform is given. Parents are always written before their children and
    /// each node in the subtree is visited once. Returns the number of nodes
    /// refreshed.
    pub fn refresh_world_transform(
        &mut self,
        id: NodeId,
        parent_world: Option<Matrix4<f32>>,
    ) -> usize {
        let mut visited = 0;
        let mut stack = vec![(id, parent_world)];

        while let Some((current, parent_world)) = stack.pop() {
            let node = &mut self.nodes[current.0];
            node.world_transform = match parent_world {
                Some(parent_world) => node.local_transform * parent_world,
                None => node.local_transform,
            };
            visited += 1;

            let world = node.world_transform;
            stack.extend(node.children.iter().rev().map(|&child| (child, Some(world))));
        }

        visited
    }

    /// Refreshes `id`'s subtree against its parent's current world transform
    pub fn refresh_subtree(&mut self, id: NodeId) -> usize {
        let parent_world = self.parent_world(id);
        self.refresh_world_transform(id, parent_world)
    }

    /// Refreshes every node from the root down
    pub fn refresh_all(&mut self) -> usize {
        self.refresh_world_transform(self.root, None)
    }

    /// Replaces `id`'s local transform with a pure translation.
    ///
    /// Any rotation already accumulated on the node is discarded. Callers that
    /// want to keep orientation should use [`SceneGraph::translate_local`].
    pub fn set_local_position(&mut self, id: NodeId, x: f32, y: f32, z: f32) {
        self.nodes[id.0].local_transform = transform::translation(x, y, z);
        self.refresh_subtree(id);
    }

    /// Composes a translation onto `id`'s current local transform
    pub fn translate_local(&mut self, id: NodeId, x: f32, y: f32, z: f32) {
        let node = &mut self.nodes[id.0];
        node.local_transform = node.local_transform * transform::translation(x, y, z);
        self.refresh_subtree(id);
    }

    /// Rotates `id` and, by the same delta, every node below it.
    ///
    /// Each local transform in the subtree becomes `local * R`; world
    /// transforms are refreshed afterwards so nothing stale is left behind.
    pub fn apply_incremental_rotation(&mut self, id: NodeId, axis: Axis, angle_degrees: f32) {
        let rotation = transform::compose_rotation(axis, angle_degrees);
        for current in self.subtree(id) {
            let node = &mut self.nodes[current.0];
            node.local_transform = node.local_transform * rotation;
        }
        self.refresh_subtree(id);
    }

    // Materials

    /// Hides every axes helper in `id`'s subtree
    pub fn hide_axes(&mut self, id: NodeId) {
        for current in self.subtree(id) {
            let node = &mut self.nodes[current.0];
            if node.kind == NodeKind::Pivot {
                node.material.hide();
            }
        }
    }

    // Debugging

    /// Renders the hierarchy as an indented `<kind> name` listing
    pub fn describe(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![(id, 0usize)];
        while let Some((current, indent)) = stack.pop() {
            let node = &self.nodes[current.0];
            out.push_str(&format!(
                "{} <{}> {}\n",
                "  ".repeat(indent),
                node.kind.label(),
                node.name
            ));
            stack.extend(node.children.iter().rev().map(|&child| (child, indent + 1)));
        }
        out
    }

    /// Names from the root down to `id`, joined with " / "
    pub fn path(&self, id: NodeId) -> String {
        let mut names = vec![self.nodes[id.0].name.as_str()];
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            names.push(&self.nodes[parent.0].name);
            current = parent;
        }
        names.reverse();
        names.join(" / ")
    }

    /// Logs the whole graph at debug level
    pub fn print_graph(&self) {
        debug!("Scene graph:\n{}", self.describe(self.root));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_axes, generate_box, Geometry};
    use crate::scene::material::Material;
    use crate::scene::transform::tests::assert_matrix_eq;
    use crate::scene::transform::{compose_rotation, translation};
    use cgmath::SquareMatrix;

    fn part(name: &str) -> SceneNode {
        SceneNode::part(
            name,
            Geometry::Surface(generate_box(1.0, 1.0, 1.0)),
            Material::from_hex(0xFF3333),
        )
    }

    /// scene -> a -> b -> c, with a sibling `d` under `a`
    fn three_levels() -> (SceneGraph, [NodeId; 4]) {
        let mut graph = SceneGraph::new("scene");
        let root = graph.root();
        let a = graph.attach(root, part("a"));
        let b = graph.attach(a, part("b"));
        let c = graph.attach(b, part("c"));
        let d = graph.attach(a, part("d"));
        graph.node_mut(a).local_transform = translation(1.0, 0.0, 0.0);
        graph.node_mut(b).local_transform = translation(0.0, 2.0, 0.0);
        graph.node_mut(c).local_transform = translation(0.0, 0.0, 3.0);
        graph.node_mut(d).local_transform = compose_rotation(Axis::Z, 45.0);
        graph.refresh_all();
        (graph, [a, b, c, d])
    }

    fn assert_consistent(graph: &SceneGraph) {
        for (id, node) in graph.iter() {
            let expected = match graph.parent_world(id) {
                Some(parent_world) => node.local_transform * parent_world,
                None => node.local_transform,
            };
            assert_matrix_eq(&node.world_transform(), &expected);
        }
    }

    #[test]
    fn test_add_child_sets_back_reference() {
        let (graph, [a, b, c, d]) = three_levels();
        assert_eq!(graph.parent(a), Some(graph.root()));
        assert_eq!(graph.parent(b), Some(a));
        assert_eq!(graph.parent(c), Some(b));
        assert_eq!(graph.children(a), &[b, d]);
        assert_eq!(graph.parent(graph.root()), None);
    }

    #[test]
    fn test_reparenting_detaches_from_old_parent() {
        let (mut graph, [a, b, c, _]) = three_levels();
        graph.add_child(a, c);
        assert!(!graph.children(b).contains(&c));
        assert_eq!(graph.children(a).last(), Some(&c));
        assert_eq!(graph.parent(c), Some(a));
    }

    #[test]
    fn test_world_is_local_times_parent_world() {
        let (graph, [a, b, c, _]) = three_levels();
        assert_consistent(&graph);
        assert_matrix_eq(&graph.node(graph.root()).world_transform(), &Matrix4::identity());

        let expected_c = graph.node(c).local_transform
            * graph.node(b).local_transform
            * graph.node(a).local_transform;
        assert_matrix_eq(&graph.node(c).world_transform(), &expected_c);
    }

    #[test]
    fn test_refresh_visits_each_node_once() {
        let (mut graph, [a, b, _, _]) = three_levels();
        assert_eq!(graph.refresh_all(), 5);
        assert_eq!(graph.refresh_subtree(a), 4);
        assert_eq!(graph.refresh_subtree(b), 2);
    }

    #[test]
    fn test_refresh_without_parent_copies_local() {
        let mut graph = SceneGraph::new("scene");
        let root = graph.root();
        graph.node_mut(root).local_transform = translation(0.0, 5.0, 0.0);
        graph.refresh_world_transform(root, None);
        assert_matrix_eq(&graph.node(root).world_transform(), &translation(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_set_local_position_overwrites_rotation() {
        let (mut graph, [a, _, _, _]) = three_levels();
        graph.apply_incremental_rotation(a, Axis::X, 30.0);
        graph.set_local_position(a, 0.5, 0.5, 0.5);
        assert_matrix_eq(&graph.node(a).local_transform, &translation(0.5, 0.5, 0.5));
        assert_consistent(&graph);
    }

    #[test]
    fn test_translate_local_keeps_rotation() {
        let (mut graph, [_, _, _, d]) = three_levels();
        graph.translate_local(d, 1.0, 0.0, 0.0);
        let expected = compose_rotation(Axis::Z, 45.0) * translation(1.0, 0.0, 0.0);
        assert_matrix_eq(&graph.node(d).local_transform, &expected);
        assert_consistent(&graph);
    }

    #[test]
    fn test_rotation_propagates_to_every_descendant() {
        let (mut graph, [a, b, c, d]) = three_levels();
        let before: Vec<_> = [a, b, c, d]
            .iter()
            .map(|&id| graph.node(id).local_transform)
            .collect();

        graph.apply_incremental_rotation(a, Axis::X, 10.0);

        let rotation = compose_rotation(Axis::X, 10.0);
        for (&id, old) in [a, b, c, d].iter().zip(before.iter()) {
            assert_matrix_eq(&graph.node(id).local_transform, &(*old * rotation));
        }
        assert_consistent(&graph);
    }

    #[test]
    fn test_rotation_leaves_ancestors_and_siblings_alone() {
        let (mut graph, [a, b, c, d]) = three_levels();
        let a_before = graph.node(a).local_transform;
        let d_before = graph.node(d).local_transform;

        graph.apply_incremental_rotation(b, Axis::Y, -5.0);

        assert_matrix_eq(&graph.node(a).local_transform, &a_before);
        assert_matrix_eq(&graph.node(d).local_transform, &d_before);
        assert_matrix_eq(
            &graph.node(c).local_transform,
            &(translation(0.0, 0.0, 3.0) * compose_rotation(Axis::Y, -5.0)),
        );
        assert_consistent(&graph);
    }

    #[test]
    fn test_repeated_rotations_compound() {
        let (mut graph, [_, b, _, _]) = three_levels();
        for _ in 0..3 {
            graph.apply_incremental_rotation(b, Axis::Z, 1.0);
        }
        let expected = translation(0.0, 2.0, 0.0) * compose_rotation(Axis::Z, 3.0);
        assert_matrix_eq(&graph.node(b).local_transform, &expected);
    }

    #[test]
    fn test_subtree_is_preorder() {
        let (graph, [a, b, c, d]) = three_levels();
        assert_eq!(graph.subtree(a), vec![a, b, c, d]);
        assert_eq!(graph.depth(c), 3);
        assert!(graph.is_ancestor(a, c));
        assert!(!graph.is_ancestor(d, c));
    }

    #[test]
    fn test_hide_axes_reaches_nested_pivots() {
        let mut graph = SceneGraph::new("scene");
        let root = graph.root();
        let body = graph.attach(root, part("body"));
        let outer = graph.attach(body, SceneNode::pivot("outer", Geometry::Lines(generate_axes(1.0))));
        let limb = graph.attach(outer, part("limb"));
        let inner = graph.attach(limb, SceneNode::pivot("inner", Geometry::Lines(generate_axes(0.5))));

        graph.node_mut(outer).material.show();
        graph.node_mut(inner).material.show();
        graph.hide_axes(root);

        assert!(graph.node(outer).material.is_hidden());
        assert!(graph.node(inner).material.is_hidden());
        assert!(!graph.node(limb).material.is_hidden());
    }

    #[test]
    fn test_describe_lists_hierarchy() {
        let (graph, _) = three_levels();
        let listing = graph.describe(graph.root());
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], " <Scene> scene");
        assert_eq!(lines[1], "   <Mesh> a");
        assert_eq!(lines[2], "     <Mesh> b");
        assert_eq!(lines[4], "   <Mesh> d");
    }

    #[test]
    fn test_path_walks_to_root() {
        let (graph, [_, _, c, d]) = three_levels();
        assert_eq!(graph.path(c), "scene / a / b / c");
        assert_eq!(graph.path(d), "scene / a / d");
        assert_eq!(graph.path(graph.root()), "scene");
    }

    #[test]
    fn test_find_by_name() {
        let (mut graph, [a, _, c, _]) = three_levels();
        assert_eq!(graph.find("c"), Some(c));
        assert_eq!(graph.find("scene"), Some(graph.root()));
        assert_eq!(graph.find("missing"), None);

        // First match in insertion order wins
        graph.attach(c, part("a"));
        assert_eq!(graph.find("a"), Some(a));
    }
}
