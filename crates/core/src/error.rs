//! Generation errors.

use crate::ShapeType;
use thiserror::Error;

/// Raised when a configuration cannot produce positions.
///
/// Only the recompute cycle that hit it is aborted; children keep whatever
/// positions they were last given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The parameters are unusable for the selected shape.
    #[error("invalid {shape} configuration: {reason}")]
    InvalidConfiguration {
        /// Shape being generated when the problem was found.
        shape: ShapeType,
        /// Which constraint was broken.
        reason: &'static str,
    },
}
