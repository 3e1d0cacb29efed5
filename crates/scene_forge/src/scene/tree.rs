//! Scene tree arena
//!
//! Nodes are stored in a slot map and addressed by [`NodeId`]. The tree owns
//! one live root node, the attachment point for the current scene. Parent
//! and child links are only changed through tree methods, which keeps the
//! structure a strict tree: one parent per node and no cycles.

use super::kind::NodeKind;
use super::node::RuntimeNode;
use crate::foundation::collections::{HandleMap, NodeId};
use thiserror::Error;

/// Tree structure errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// Handle does not refer to a live node
    #[error("Node {0:?} does not exist")]
    MissingNode(NodeId),

    /// Child is already attached somewhere
    #[error("Node {0:?} already has a parent")]
    AlreadyParented(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Intended parent
        parent: NodeId,
        /// Intended child
        child: NodeId,
    },
}

/// Arena-backed hierarchy of runtime nodes
#[derive(Debug)]
pub struct SceneTree {
    nodes: HandleMap<RuntimeNode>,
    root: NodeId,
    pending_free: Vec<NodeId>,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    /// Create a tree containing only the live root
    pub fn new() -> Self {
        let mut nodes = HandleMap::with_key();
        let mut root_node = RuntimeNode::new(NodeKind::Node);
        root_node.name = "root".to_string();
        let root = nodes.insert(root_node);
        Self {
            nodes,
            root,
            pending_free: Vec::new(),
        }
    }

    /// The live root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, including detached and pending ones
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds nothing but the live root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Store a detached node
    pub fn insert(&mut self, node: RuntimeNode) -> NodeId {
        let mut node = node;
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    /// Borrow a node
    pub fn get(&self, id: NodeId) -> Option<&RuntimeNode> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut RuntimeNode> {
        self.nodes.get_mut(id)
    }

    /// Whether the handle refers to a stored node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Children of a node in insertion order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// Append `child` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::MissingNode(parent));
        }
        let child_node = self.nodes.get(child).ok_or(TreeError::MissingNode(child))?;
        if child_node.parent.is_some() || child == self.root {
            return Err(TreeError::AlreadyParented(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Detach a node from its parent, keeping its subtree intact
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent].children.retain(|&c| c != id);
        self.nodes[id].parent = None;
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether the node is reachable from the live root
    pub fn is_inside_tree(&self, id: NodeId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    /// The subtree rooted at `id` in pre-order (declaration order)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// Number of nodes in the subtree rooted at `id`
    pub fn subtree_len(&self, id: NodeId) -> usize {
        self.descendants(id).len()
    }

    /// Depth of the subtree rooted at `id` (a leaf has depth 1)
    pub fn depth(&self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        1 + self.children(id).iter().map(|&c| self.depth(c)).max().unwrap_or(0)
    }

    /// Live nodes registered in `group`, in tree order
    pub fn nodes_in_group(&self, group: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.nodes[id].is_in_group(group))
            .collect()
    }

    /// Find a node by a `/`-separated path of child names relative to `from`
    ///
    /// The first child with a matching name wins at each step.
    pub fn find_path(&self, from: NodeId, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(from, |current, segment| {
                self.children(current)
                    .iter()
                    .copied()
                    .find(|&c| self.nodes[c].name == segment)
            })
    }

    /// Destroy a subtree immediately, returning the number of nodes freed
    ///
    /// The live root itself is never destroyed; its children are.
    pub fn destroy(&mut self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        if id == self.root {
            let children = self.nodes[id].children.clone();
            return children.into_iter().map(|c| self.destroy(c)).sum();
        }
        self.detach(id);
        let doomed = self.descendants(id);
        for node in &doomed {
            self.nodes.remove(*node);
        }
        doomed.len()
    }

    /// Detach a subtree now and release it at the next [`Self::flush_deferred`]
    pub fn queue_free(&mut self, id: NodeId) {
        if !self.contains(id) || id == self.root {
            return;
        }
        self.detach(id);
        if !self.pending_free.contains(&id) {
            self.pending_free.push(id);
        }
    }

    /// Number of subtrees waiting for release
    pub fn pending_free_count(&self) -> usize {
        self.pending_free.len()
    }

    /// Release every queued subtree, returning the number of nodes freed
    pub fn flush_deferred(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_free);
        let freed: usize = pending.into_iter().map(|id| self.destroy(id)).sum();
        if freed > 0 {
            log::debug!("Released {} deferred node(s)", freed);
        }
        freed
    }
}

impl std::ops::Index<NodeId> for SceneTree {
    type Output = RuntimeNode;

    fn index(&self, id: NodeId) -> &RuntimeNode {
        &self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(tree: &mut SceneTree, name: &str) -> NodeId {
        let mut node = RuntimeNode::new(NodeKind::Node2D);
        node.name = name.to_string();
        tree.insert(node)
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let a = named(&mut tree, "a");
        let b = named(&mut tree, "b");
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(b), Some(root));
        assert!(tree.is_inside_tree(b));
    }

    #[test]
    fn test_single_parent_and_no_cycles() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let a = named(&mut tree, "a");
        let b = named(&mut tree, "b");
        tree.add_child(root, a).unwrap();
        tree.add_child(a, b).unwrap();

        assert_eq!(tree.add_child(root, b), Err(TreeError::AlreadyParented(b)));
        tree.detach(a);
        assert_eq!(tree.add_child(b, a), Err(TreeError::Cycle { parent: b, child: a }));
        assert_eq!(tree.add_child(a, a), Err(TreeError::Cycle { parent: a, child: a }));
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let a = named(&mut tree, "a");
        let b = named(&mut tree, "b");
        let c = named(&mut tree, "c");
        tree.add_child(root, a).unwrap();
        tree.add_child(a, b).unwrap();
        tree.add_child(b, c).unwrap();

        assert_eq!(tree.depth(a), 3);
        assert_eq!(tree.destroy(a), 3);
        assert!(!tree.contains(c));
        assert!(tree.children(root).is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_queue_free_detaches_immediately() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let a = named(&mut tree, "a");
        tree.add_child(root, a).unwrap();

        tree.queue_free(a);
        assert!(tree.children(root).is_empty());
        assert!(tree.contains(a));
        assert_eq!(tree.pending_free_count(), 1);

        assert_eq!(tree.flush_deferred(), 1);
        assert!(!tree.contains(a));
    }

    #[test]
    fn test_find_path_and_groups() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let level = named(&mut tree, "Level");
        let enemy = named(&mut tree, "Enemy");
        tree.add_child(root, level).unwrap();
        tree.add_child(level, enemy).unwrap();
        tree.get_mut(enemy).unwrap().add_to_group("enemies");

        assert_eq!(tree.find_path(root, "Level/Enemy"), Some(enemy));
        assert_eq!(tree.find_path(root, "Level/Missing"), None);
        assert_eq!(tree.nodes_in_group("enemies"), vec![enemy]);

        tree.detach(level);
        assert!(tree.nodes_in_group("enemies").is_empty());
    }

    #[test]
    fn test_root_is_never_destroyed() {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let a = named(&mut tree, "a");
        tree.add_child(root, a).unwrap();

        assert_eq!(tree.destroy(root), 1);
        assert!(tree.contains(root));
        tree.queue_free(root);
        assert_eq!(tree.pending_free_count(), 0);
    }
}
