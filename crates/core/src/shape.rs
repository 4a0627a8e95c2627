//! Layout shape families.
//!
//! A [`ShapeType`] selects which generation rule places the children of a
//! layout. Names are stable: they are what the interchange format stores in
//! its `type` field.

use std::fmt;
use std::str::FromStr;

/// Error returned when a shape name is not one of the known families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShapeError {
    name: String,
}

impl UnknownShapeError {
    /// The rejected name, as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown layout type {:?} (expected one of {})",
            self.name,
            ShapeType::ALL
                .iter()
                .map(|shape| shape.name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownShapeError {}

/// The enumerated layout families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeType {
    /// A single row, one column per child.
    #[default]
    Line,
    /// A grid with a fixed column count.
    Box,
    /// Children spread around a circle.
    Circle,
    /// The six face centres of a cube.
    Cube,
    /// The twenty vertices of a regular dodecahedron.
    Dodecahedron,
    /// The four vertices of a tetrahedral pyramid.
    Pyramid,
}

impl ShapeType {
    /// Every shape, in declaration order.
    pub const ALL: [ShapeType; 6] = [
        ShapeType::Line,
        ShapeType::Box,
        ShapeType::Circle,
        ShapeType::Cube,
        ShapeType::Dodecahedron,
        ShapeType::Pyramid,
    ];

    /// Stable symbolic name.
    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Line => "Line",
            ShapeType::Box => "Box",
            ShapeType::Circle => "Circle",
            ShapeType::Cube => "Cube",
            ShapeType::Dodecahedron => "Dodecahedron",
            ShapeType::Pyramid => "Pyramid",
        }
    }

    /// Number of positions a fixed-vertex shape always produces, or `None`
    /// when the count follows the number of children.
    pub fn fixed_point_count(self) -> Option<usize> {
        match self {
            ShapeType::Cube => Some(6),
            ShapeType::Dodecahedron => Some(20),
            ShapeType::Pyramid => Some(4),
            ShapeType::Line | ShapeType::Box | ShapeType::Circle => None,
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeType {
    type Err = UnknownShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeType::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| UnknownShapeError {
                name: s.to_string(),
            })
    }
}
