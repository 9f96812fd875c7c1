//! Bézier control grids and tensor-product surface evaluation.

use crate::basis::binomials;
use crate::error::{FitError, Result};
use resect_math::{Point3, Vec3};

/// Control points of a tensor-product Bézier patch, stored row-major.
///
/// Point `(i, j)` multiplies `B_i(u)·B_j(v)`; rows run along `u`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierControlGrid {
    degree_u: usize,
    degree_v: usize,
    points: Vec<Point3>,
}

impl BezierControlGrid {
    /// Wrap a row-major list of `(degree_u + 1) * (degree_v + 1)` points.
    pub fn new(degree_u: usize, degree_v: usize, points: Vec<Point3>) -> Result<Self> {
        let expected = (degree_u + 1) * (degree_v + 1);
        if points.len() != expected {
            return Err(FitError::InvalidGrid(format!(
                "degree ({degree_u}, {degree_v}) needs {expected} control points, got {}",
                points.len()
            )));
        }
        Ok(Self {
            degree_u,
            degree_v,
            points,
        })
    }

    /// Planar `m × n` grid spanning `[-0.5, 0.5]²` at `z = 0`.
    ///
    /// Fewer than two points in a direction is raised to two.
    pub fn flat(m: usize, n: usize) -> Self {
        let m = m.max(2);
        let n = n.max(2);
        let mut points = Vec::with_capacity(m * n);
        for i in 0..m {
            let x = -0.5 + i as f64 / (m - 1) as f64;
            for j in 0..n {
                let y = -0.5 + j as f64 / (n - 1) as f64;
                points.push(Point3::new(x, y, 0.0));
            }
        }
        Self {
            degree_u: m - 1,
            degree_v: n - 1,
            points,
        }
    }

    /// Degree along `u`.
    pub fn degree_u(&self) -> usize {
        self.degree_u
    }

    /// Degree along `v`.
    pub fn degree_v(&self) -> usize {
        self.degree_v
    }

    /// Control points per row.
    pub fn row_len(&self) -> usize {
        self.degree_v + 1
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Control point `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Option<&Point3> {
        if i > self.degree_u || j > self.degree_v {
            return None;
        }
        self.points.get(i * self.row_len() + j)
    }

    /// All control points, row-major.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// True if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.coords.iter().all(|c| c.is_finite()))
    }

    /// Flatten to `[x, y, z]` triples, row-major.
    pub fn to_arrays(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(|p| [p.x, p.y, p.z]).collect()
    }
}

/// Points and quad cells sampled from a [`BezierSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceTessellation {
    /// Samples, row-major with `res_v` samples per row.
    pub points: Vec<Point3>,
    /// Parameter `(u, v)` of each sample.
    pub tcoords: Vec<[f64; 2]>,
    /// Quad cells as indices into `points`.
    pub quads: Vec<[u32; 4]>,
}

/// Evaluable tensor-product Bézier surface.
#[derive(Debug, Clone)]
pub struct BezierSurface {
    control: BezierControlGrid,
    coeff_u: Vec<f64>,
    coeff_v: Vec<f64>,
}

impl BezierSurface {
    /// Surface over the given control grid.
    pub fn new(control: BezierControlGrid) -> Self {
        let coeff_u = binomials(control.degree_u);
        let coeff_v = binomials(control.degree_v);
        Self {
            control,
            coeff_u,
            coeff_v,
        }
    }

    /// The control grid.
    pub fn control_points(&self) -> &BezierControlGrid {
        &self.control
    }

    /// Point on the surface at `(u, v)`, each clamped to `[0, 1]`.
    pub fn eval(&self, u: f64, v: f64) -> Point3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let bu = bernstein(&self.coeff_u, u);
        let bv = bernstein(&self.coeff_v, v);
        let row_len = self.control.row_len();

        let mut acc = Vec3::zeros();
        for (i, wu) in bu.iter().enumerate() {
            for (j, wv) in bv.iter().enumerate() {
                acc += self.control.points[i * row_len + j].coords * (wu * wv);
            }
        }
        Point3::from(acc)
    }

    /// Sample a `res_u × res_v` lattice of the surface, with quads joining
    /// neighbouring samples.
    pub fn tessellate(&self, res_u: usize, res_v: usize) -> Result<SurfaceTessellation> {
        if res_u < 2 || res_v < 2 {
            return Err(FitError::InvalidGrid(format!(
                "tessellation resolution {res_u}x{res_v} must be at least 2x2"
            )));
        }

        let mut points = Vec::with_capacity(res_u * res_v);
        let mut tcoords = Vec::with_capacity(res_u * res_v);
        for i in 0..res_u {
            let u = i as f64 / (res_u - 1) as f64;
            for j in 0..res_v {
                let v = j as f64 / (res_v - 1) as f64;
                points.push(self.eval(u, v));
                tcoords.push([u, v]);
            }
        }

        let mut quads = Vec::with_capacity((res_u - 1) * (res_v - 1));
        let stride = res_v as u32;
        for i in 0..res_u as u32 - 1 {
            for j in 0..stride - 1 {
                let a = i * stride + j;
                let b = a + 1;
                let c = a + stride + 1;
                let d = a + stride;
                quads.push([d, c, b, a]);
            }
        }

        Ok(SurfaceTessellation {
            points,
            tcoords,
            quads,
        })
    }
}

fn bernstein(coeffs: &[f64], t: f64) -> Vec<f64> {
    let n = coeffs.len() - 1;
    coeffs
        .iter()
        .enumerate()
        .map(|(k, c)| c * t.powi(k as i32) * (1.0 - t).powi((n - k) as i32))
        .collect()
}
