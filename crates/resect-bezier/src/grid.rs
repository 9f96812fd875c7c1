//! Structured point grids.

use crate::error::{FitError, Result};
use resect_math::Point3;

/// A `size_u × size_v` lattice of points, stored row-major.
///
/// Row `i` is one cross-section ("rib") sampled at `size_v` points; column `j`
/// traces the sweep across ribs.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredGrid {
    size_u: usize,
    size_v: usize,
    points: Vec<Point3>,
}

impl StructuredGrid {
    /// Wrap a row-major point list.
    pub fn new(size_u: usize, size_v: usize, points: Vec<Point3>) -> Result<Self> {
        if size_u == 0 || size_v == 0 {
            return Err(FitError::InvalidGrid(format!(
                "empty dimension {size_u}x{size_v}"
            )));
        }
        if points.len() != size_u * size_v {
            return Err(FitError::InvalidGrid(format!(
                "{}x{} grid needs {} points, got {}",
                size_u,
                size_v,
                size_u * size_v,
                points.len()
            )));
        }
        Ok(Self {
            size_u,
            size_v,
            points,
        })
    }

    /// Build a grid from its rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Point3>>) -> Result<Self> {
        let size_u = rows.len();
        let size_v = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != size_v) {
            return Err(FitError::InvalidGrid("ragged rows".into()));
        }
        Self::new(size_u, size_v, rows.into_iter().flatten().collect())
    }

    /// Number of rows.
    pub fn size_u(&self) -> usize {
        self.size_u
    }

    /// Number of points per row.
    pub fn size_v(&self) -> usize {
        self.size_v
    }

    /// Point at row `i`, column `j`.
    pub fn at(&self, i: usize, j: usize) -> &Point3 {
        &self.points[i * self.size_v + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[Point3] {
        &self.points[i * self.size_v..(i + 1) * self.size_v]
    }

    /// Column `j` collected into a new vector.
    pub fn column(&self, j: usize) -> Vec<Point3> {
        (0..self.size_u).map(|i| *self.at(i, j)).collect()
    }

    /// All points, row-major.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }
}
