//! Child-set change detection.

use crate::host::SceneHost;

/// Ordered children captured at the last recompute.
///
/// Always rebuilt wholesale by [`recapture`]; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSnapshot<N> {
    children: Vec<N>,
}

impl<N> Default for ChildSnapshot<N> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<N: Copy> ChildSnapshot<N> {
    /// Number of captured children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Captured children in order.
    pub fn as_slice(&self) -> &[N] {
        &self.children
    }

    /// Iterate over captured children in order.
    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.children.iter().copied()
    }
}

impl<N> From<Vec<N>> for ChildSnapshot<N> {
    fn from(children: Vec<N>) -> Self {
        Self { children }
    }
}

/// Whether the live children of `anchor` differ structurally from `snapshot`.
///
/// Detects a different child count, or a captured child that is no longer
/// parented to `anchor`. Reordering children without changing the count or
/// their parent is not detected.
pub fn has_changed<H: SceneHost>(
    host: &H,
    anchor: H::Node,
    snapshot: &ChildSnapshot<H::Node>,
) -> bool {
    if host.child_count(anchor) != snapshot.len() {
        return true;
    }
    snapshot
        .iter()
        .any(|child| host.parent_of(child) != Some(anchor))
}

/// Re-read the live children of `anchor`.
pub fn recapture<H: SceneHost>(host: &H, anchor: H::Node) -> ChildSnapshot<H::Node> {
    ChildSnapshot::from(host.children(anchor))
}
