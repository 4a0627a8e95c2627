//! The seam between the layout engine and whatever owns the scene.

use glam::Vec3;
use std::fmt::Debug;

/// Scene-graph operations the engine relies on.
///
/// The host owns node lifetime and the parent/child hierarchy. The engine
/// only enumerates children, checks parentage, and writes local positions and
/// visibility. It never creates, destroys or reparents nodes.
pub trait SceneHost {
    /// Opaque node identity.
    type Node: Copy + Eq + Debug;

    /// Ordered children of `anchor`.
    fn children(&self, anchor: Self::Node) -> Vec<Self::Node>;

    /// Number of children of `anchor`.
    fn child_count(&self, anchor: Self::Node) -> usize {
        self.children(anchor).len()
    }

    /// Current parent of `node`, or `None` for roots and missing nodes.
    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;

    /// Position of `node` relative to its parent.
    fn local_position(&self, node: Self::Node) -> Option<Vec3>;

    /// Move `node` relative to its parent. Missing nodes are ignored.
    fn set_local_position(&mut self, node: Self::Node, position: Vec3);

    /// Whether `node` is currently shown.
    fn is_visible(&self, node: Self::Node) -> bool;

    /// Show or hide `node`. Missing nodes are ignored.
    fn set_visible(&mut self, node: Self::Node, visible: bool);
}
