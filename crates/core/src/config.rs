//! Layout parameters.

use crate::ShapeType;

/// Upper bound for [`LayoutConfig::angle`], in degrees.
pub const MAX_ANGLE: f32 = 360.0;

/// Per-axis participation flags.
///
/// Each component is expected to be `0` or `1`. Shape rules test the flags
/// individually and give them shape-specific meaning, so this is not a plane
/// normal. Components outside `{0, 1}` match neither test and leave that axis
/// at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneMask {
    /// X flag.
    pub x: i32,
    /// Y flag.
    pub y: i32,
    /// Z flag.
    pub z: i32,
}

impl PlaneMask {
    /// X spreads along columns, Y along rows.
    pub const XY: Self = Self::new(0, 1, 0);

    /// Create a mask from raw flags.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Flags as `[x, y, z]`.
    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for PlaneMask {
    fn default() -> Self {
        Self::XY
    }
}

impl From<[i32; 3]> for PlaneMask {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Everything the generator needs to place children.
///
/// Fields are private so that the editor-facing constraint on `angle` holds
/// for every instance. All other values are accepted as given; a bad value
/// (a Box with zero columns) only surfaces when positions are generated.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    angle: f32,
    columns: u16,
    margin: f32,
    margin_column: f32,
    margin_row: f32,
    plane: PlaneMask,
    radius: f32,
    reverse: bool,
    fill: bool,
    shape: ShapeType,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            angle: 0.0,
            columns: 1,
            margin: 0.0,
            margin_column: 1.0,
            margin_row: 1.0,
            plane: PlaneMask::default(),
            radius: 1.0,
            reverse: false,
            fill: false,
            shape: ShapeType::default(),
        }
    }
}

impl LayoutConfig {
    /// Default parameters for the given shape.
    pub fn new(shape: ShapeType) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Per-child angular step in degrees; `0` spreads children over a full turn.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Set the angular step, clamped to `[0, 360]`.
    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees.clamp(0.0, MAX_ANGLE);
    }

    /// Column count used by [`ShapeType::Box`].
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Set the Box column count.
    pub fn set_columns(&mut self, columns: u16) {
        self.columns = columns;
    }

    /// General margin. Stored and persisted; no shape reads it yet.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Set the general margin.
    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
    }

    /// Spacing between columns.
    pub fn margin_column(&self) -> f32 {
        self.margin_column
    }

    /// Set the spacing between columns.
    pub fn set_margin_column(&mut self, margin: f32) {
        self.margin_column = margin;
    }

    /// Spacing between rows.
    pub fn margin_row(&self) -> f32 {
        self.margin_row
    }

    /// Set the spacing between rows.
    pub fn set_margin_row(&mut self, margin: f32) {
        self.margin_row = margin;
    }

    /// Axis flags.
    pub fn plane(&self) -> PlaneMask {
        self.plane
    }

    /// Set the axis flags.
    pub fn set_plane(&mut self, plane: PlaneMask) {
        self.plane = plane;
    }

    /// Radius for Circle, and twice the scale of the fixed-vertex shapes.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the radius.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Whether positions are assigned in reverse order.
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Set reverse assignment.
    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    /// Fill flag. Persisted but not consulted by any shape rule.
    pub fn fill(&self) -> bool {
        self.fill
    }

    /// Set the fill flag.
    pub fn set_fill(&mut self, fill: bool) {
        self.fill = fill;
    }

    /// Selected shape family.
    pub fn shape(&self) -> ShapeType {
        self.shape
    }

    /// Select the shape family.
    pub fn set_shape(&mut self, shape: ShapeType) {
        self.shape = shape;
    }

    /// Builder: set the angular step (clamped).
    pub fn with_angle(mut self, degrees: f32) -> Self {
        self.set_angle(degrees);
        self
    }

    /// Builder: set the column count.
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = columns;
        self
    }

    /// Builder: set column and row spacing.
    pub fn with_margins(mut self, column: f32, row: f32) -> Self {
        self.margin_column = column;
        self.margin_row = row;
        self
    }

    /// Builder: set the axis flags.
    pub fn with_plane(mut self, plane: PlaneMask) -> Self {
        self.plane = plane;
        self
    }

    /// Builder: set the radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Builder: set reverse assignment.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}
