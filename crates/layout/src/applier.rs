//! Writing generated positions onto children.

use crate::host::SceneHost;
use crate::tracker::ChildSnapshot;
use glam::Vec3;

/// Outcome of one [`apply`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    /// Children that received a position.
    pub placed: usize,
    /// Children beyond the generated positions.
    pub excess: usize,
    /// Excess children that were hidden.
    pub culled: usize,
}

/// Assign `positions` to the children in `snapshot`, in order.
///
/// With `reverse` the positions are consumed back to front; the set of
/// children touched is the same either way. The first `min(children,
/// positions)` children are moved and shown. The rest keep their position and
/// are hidden when `cull_excess` is set, shown otherwise. Surplus positions
/// are dropped.
pub fn apply<H: SceneHost>(
    host: &mut H,
    mut positions: Vec<Vec3>,
    snapshot: &ChildSnapshot<H::Node>,
    reverse: bool,
    cull_excess: bool,
) -> ApplyReport {
    if reverse {
        positions.reverse();
    }

    let placed = snapshot.len().min(positions.len());
    for (child, position) in snapshot.iter().zip(positions.iter().copied()) {
        host.set_local_position(child, position);
        host.set_visible(child, true);
    }

    let excess = snapshot.len() - placed;
    for child in snapshot.iter().skip(placed) {
        host.set_visible(child, !cull_excess);
    }

    ApplyReport {
        placed,
        excess,
        culled: if cull_excess { excess } else { 0 },
    }
}
