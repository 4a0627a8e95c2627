#![warn(missing_docs)]
//! Test helpers for formation crates: golden snapshots and position checks.

mod snapshot;

use glam::Vec3;
use serde::Serialize;

pub use snapshot::*;

/// Positions produced for one shape, in the form stored in golden files.
#[derive(Debug, Clone, Serialize)]
pub struct FormationRecord {
    /// Shape name.
    pub shape: String,
    /// Number of children the positions were generated for.
    pub child_count: usize,
    /// Positions as `[x, y, z]`.
    pub positions: Vec<[f32; 3]>,
}

impl FormationRecord {
    /// Capture `positions` generated for `child_count` children of `shape`.
    pub fn new(shape: impl Into<String>, child_count: usize, positions: &[Vec3]) -> Self {
        Self {
            shape: shape.into(),
            child_count,
            positions: positions.iter().map(|p| p.to_array()).collect(),
        }
    }
}

/// Panic unless `actual` and `expected` have the same length and every pair
/// is within `epsilon` on each axis.
pub fn assert_positions_near(actual: &[Vec3], expected: &[Vec3], epsilon: f32) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "position count differs: {actual:?} vs {expected:?}"
    );
    for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            a.abs_diff_eq(*e, epsilon),
            "position {index} differs: got {a:?}, expected {e:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_flattens_vectors() {
        let record = FormationRecord::new("Line", 2, &[Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(record.positions, vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
    }

    #[test]
    fn near_positions_pass() {
        assert_positions_near(&[Vec3::new(1.0, 0.0, 0.0)], &[Vec3::new(1.0 + 1e-7, 0.0, 0.0)], 1e-5);
    }

    #[test]
    #[should_panic(expected = "position 0 differs")]
    fn distant_positions_fail() {
        assert_positions_near(&[Vec3::ZERO], &[Vec3::ONE], 1e-5);
    }
}
