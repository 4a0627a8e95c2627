//! In-memory scene graph.
//!
//! Used by the CLI preview and by tests that need a host without pulling in
//! an ECS world.

use crate::host::SceneHost;
use glam::Vec3;
use std::collections::HashMap;

/// Handle to a node in a [`MemoryScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index, stable for the lifetime of the scene.
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Vec3,
    visible: bool,
}

impl Node {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            visible: true,
        }
    }
}

/// A minimal parent/child hierarchy with local positions and visibility.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    nodes: HashMap<NodeId, Node>,
    next_id: u32,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` is still alive.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Add a parentless node.
    pub fn spawn_root(&mut self) -> NodeId {
        self.insert(Node::new(None))
    }

    /// Add a node as the last child of `parent`.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn spawn_child(&mut self, parent: NodeId) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.insert(Node::new(Some(parent)));
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        Some(id)
    }

    /// Add `count` children to `parent`, returning them in order.
    pub fn spawn_children(&mut self, parent: NodeId, count: usize) -> Vec<NodeId> {
        (0..count)
            .filter_map(|_| self.spawn_child(parent))
            .collect()
    }

    /// Move `node` under `new_parent` (appended last), or make it a root.
    pub fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) {
        if !self.contains(node) {
            return;
        }
        if let Some(parent) = new_parent {
            if !self.contains(parent) || parent == node {
                return;
            }
        }
        self.detach(node);
        if let Some(parent) = new_parent {
            if let Some(entry) = self.nodes.get_mut(&parent) {
                entry.children.push(node);
            }
        }
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.parent = new_parent;
        }
    }

    /// Remove `node` and its whole subtree.
    pub fn despawn(&mut self, node: NodeId) {
        if !self.contains(node) {
            return;
        }
        self.detach(node);
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                pending.extend(removed.children);
            }
        }
    }

    /// Swap the order of two children of `parent`.
    pub fn swap_children(&mut self, parent: NodeId, a: usize, b: usize) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            if a < node.children.len() && b < node.children.len() {
                node.children.swap(a, b);
            }
        }
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get(&node).and_then(|entry| entry.parent);
        if let Some(parent) = parent {
            if let Some(entry) = self.nodes.get_mut(&parent) {
                entry.children.retain(|child| *child != node);
            }
        }
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.parent = None;
        }
    }
}

impl SceneHost for MemoryScene {
    type Node = NodeId;

    fn children(&self, anchor: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&anchor)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn child_count(&self, anchor: NodeId) -> usize {
        self.nodes.get(&anchor).map_or(0, |node| node.children.len())
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|entry| entry.parent)
    }

    fn local_position(&self, node: NodeId) -> Option<Vec3> {
        self.nodes.get(&node).map(|entry| entry.position)
    }

    fn set_local_position(&mut self, node: NodeId, position: Vec3) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.position = position;
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|entry| entry.visible)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.visible = visible;
        }
    }
}
