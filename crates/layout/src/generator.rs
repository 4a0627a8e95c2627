//! Position generation for every shape family.
//!
//! All functions here are pure: the same configuration and child count
//! always yield the same positions, in the same order.
//!
//! Line, Box and Circle produce one position per child (Box may pad its last
//! row). Cube, Dodecahedron and Pyramid produce a fixed vertex set regardless
//! of how many children exist; the applier reconciles the difference.

use formation_core::{LayoutConfig, LayoutError, PlaneMask, ShapeType};
use glam::Vec3;
use std::f32::consts::TAU;

/// Generate positions for `child_count` children using `config`.
pub fn generate(config: &LayoutConfig, child_count: usize) -> Result<Vec<Vec3>, LayoutError> {
    match config.shape() {
        ShapeType::Line => Ok(line_positions(config, child_count)),
        ShapeType::Box => box_positions(config, config.columns() as usize, child_count),
        ShapeType::Circle => Ok(circle_positions(config, child_count)),
        ShapeType::Cube => Ok(cube_positions(config.radius())),
        ShapeType::Dodecahedron => Ok(dodecahedron_positions(config.radius())),
        ShapeType::Pyramid => Ok(pyramid_positions(config.radius())),
    }
}

/// A single row with one column per child.
pub fn line_positions(config: &LayoutConfig, child_count: usize) -> Vec<Vec3> {
    if child_count == 0 {
        return Vec::new();
    }
    grid(config.plane(), config.margin_column(), config.margin_row(), child_count, child_count)
}

/// A row-major grid of `columns` columns and `ceil(child_count / columns)` rows.
///
/// Every row is emitted in full, so the result can be longer than
/// `child_count`. Zero columns is rejected.
pub fn box_positions(
    config: &LayoutConfig,
    columns: usize,
    child_count: usize,
) -> Result<Vec<Vec3>, LayoutError> {
    if columns == 0 {
        return Err(LayoutError::InvalidConfiguration {
            shape: config.shape(),
            reason: "column count must be at least 1",
        });
    }
    Ok(grid(config.plane(), config.margin_column(), config.margin_row(), columns, child_count))
}

fn grid(
    plane: PlaneMask,
    margin_column: f32,
    margin_row: f32,
    columns: usize,
    child_count: usize,
) -> Vec<Vec3> {
    let rows = child_count.div_ceil(columns);
    let mut positions = Vec::with_capacity(rows * columns);

    for row in 0..rows {
        for column in 0..columns {
            let mut position = Vec3::ZERO;

            // Both x and y follow the column index when their flags are 0.
            if plane.x == 0 {
                position.x = column as f32 * margin_column;
            }
            if plane.y == 0 {
                position.y = column as f32 * margin_column;
            }
            if plane.y == 1 {
                position.y = row as f32 * margin_row;
            }
            if plane.z == 1 {
                position.z = row as f32 * margin_row;
            }

            positions.push(position);
        }
    }

    positions
}

/// Angular step, in radians, of the child at `index`.
///
/// With a zero angle the children split one full turn evenly; otherwise each
/// child advances by `angle` degrees, which may fall short of or exceed a
/// full turn.
pub fn circle_step(angle: f32, index: usize, child_count: usize) -> f32 {
    if angle == 0.0 {
        index as f32 * TAU / child_count as f32
    } else {
        (index as f32 * angle).to_radians()
    }
}

/// One point per child on a circle of `config.radius()`.
pub fn circle_positions(config: &LayoutConfig, child_count: usize) -> Vec<Vec3> {
    let plane = config.plane();
    let radius = config.radius();

    (0..child_count)
        .map(|index| {
            let step = circle_step(config.angle(), index, child_count);
            let mut position = Vec3::ZERO;

            if plane.x == 0 {
                position.x = radius * step.cos();
            }
            if plane.y == 0 {
                position.y = radius * step.cos();
            } else if plane.y == 1 {
                position.y = radius * step.sin();
            }
            if plane.z == 1 {
                position.z = radius * step.sin();
            }

            position
        })
        .collect()
}

/// The six axis directions, `+X +Y +Z -X -Y -Z`, scaled by `radius / 2`.
pub fn cube_positions(radius: f32) -> Vec<Vec3> {
    scaled(
        &[Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z],
        radius,
    )
}

/// The twenty vertices of a regular dodecahedron, scaled by `radius / 2`.
pub fn dodecahedron_positions(radius: f32) -> Vec<Vec3> {
    let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
    let b = 1.0 / phi;
    let c = 2.0 - phi;

    scaled(
        &[
            Vec3::new(-1.0, c, 0.0),
            Vec3::new(-1.0, -c, 0.0),
            Vec3::new(0.0, -1.0, c),
            Vec3::new(0.0, -1.0, -c),
            Vec3::new(0.0, 1.0, c),
            Vec3::new(0.0, 1.0, -c),
            Vec3::new(1.0, c, 0.0),
            Vec3::new(1.0, -c, 0.0),
            Vec3::new(b, b, b),
            Vec3::new(b, b, -b),
            Vec3::new(b, -b, b),
            Vec3::new(b, -b, -b),
            Vec3::new(c, 0.0, 1.0),
            Vec3::new(c, 0.0, -1.0),
            Vec3::new(-b, b, b),
            Vec3::new(-b, b, -b),
            Vec3::new(-b, -b, b),
            Vec3::new(-b, -b, -b),
            Vec3::new(-c, 0.0, 1.0),
            Vec3::new(-c, 0.0, -1.0),
        ],
        radius,
    )
}

/// Three base corners on the XZ plane plus an apex on Y, scaled by `radius / 2`.
pub fn pyramid_positions(radius: f32) -> Vec<Vec3> {
    let sqrt_3 = 3.0f32.sqrt();
    let neg_inv_sqrt_3 = -1.0 / sqrt_3;
    let apex = 2.0 * (2.0f32 / 3.0).sqrt();

    scaled(
        &[
            Vec3::new(0.0, 0.0, sqrt_3 + neg_inv_sqrt_3),
            Vec3::new(-1.0, 0.0, neg_inv_sqrt_3),
            Vec3::new(1.0, 0.0, neg_inv_sqrt_3),
            Vec3::new(0.0, apex, 0.0),
        ],
        radius,
    )
}

fn scaled(unit: &[Vec3], radius: f32) -> Vec<Vec3> {
    let scale = radius / 2.0;
    unit.iter().map(|vertex| *vertex * scale).collect()
}
