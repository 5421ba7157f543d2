//! Flat lattice of landscape points.

use crate::constants::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_GRID_SPACING};
use glam::Vec3;

/// Rest positions `(x, 0, z)` of every point, fixed at construction.
///
/// Row `i`, column `j` sits at `((i - rows/2) * spacing, 0, (j - cols/2) * spacing)`
/// and is stored at index `i * cols + j`. The halves are real-valued, so odd
/// sizes land on half cells.
#[derive(Debug, Clone)]
pub struct PointGrid {
    rows: usize,
    cols: usize,
    spacing: f32,
    points: Vec<Vec3>,
}

impl Default for PointGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_ROWS, DEFAULT_GRID_COLS, DEFAULT_GRID_SPACING)
    }
}

impl PointGrid {
    pub fn new(rows: usize, cols: usize, spacing: f32) -> Self {
        let half_rows = rows as f32 / 2.0;
        let half_cols = cols as f32 / 2.0;
        let mut points = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                points.push(Vec3::new(
                    (i as f32 - half_rows) * spacing,
                    0.0,
                    (j as f32 - half_cols) * spacing,
                ));
            }
        }
        log::debug!("Built {rows}x{cols} point grid, spacing {spacing}");
        Self { rows, cols, spacing, points }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn point(&self, row: usize, col: usize) -> Option<Vec3> {
        if row < self.rows && col < self.cols {
            Some(self.points[row * self.cols + col])
        } else {
            None
        }
    }

    /// Min and max corners on the ground plane.
    pub fn extent(&self) -> (Vec3, Vec3) {
        match (self.points.first(), self.points.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => (Vec3::ZERO, Vec3::ZERO),
        }
    }
}
