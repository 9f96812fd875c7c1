//! Least-squares fitting of a Bézier patch to a structured grid.
//!
//! Each coordinate is solved independently as
//! `C = (NuᵀNu)⁻¹ Nuᵀ · P · Nv (NvᵀNv)⁻¹`, where `Nu` and `Nv` are Bernstein
//! basis matrices evaluated at the grid's parameter values.

use crate::basis::basis_matrix;
use crate::error::{FitError, Result};
use crate::grid::StructuredGrid;
use crate::parametrize::{compute_averaging_params_surface, ParametrizationMethod};
use crate::surface::BezierControlGrid;
use nalgebra::{Cholesky, DMatrix, SymmetricEigen};
use resect_math::Point3;

/// Smallest accepted ratio between the extreme eigenvalues of `NᵀN`.
const MIN_CONDITION_RATIO: f64 = 1e-12;

/// Fit control points to `grid` given precomputed basis matrices.
///
/// `basis_u` must have one row per grid row and `basis_v` one row per grid
/// column; their column counts fix the degrees of the patch.
pub fn fit_bezier_surface(
    grid: &StructuredGrid,
    basis_u: &DMatrix<f64>,
    basis_v: &DMatrix<f64>,
) -> Result<BezierControlGrid> {
    if basis_u.nrows() != grid.size_u() || basis_v.nrows() != grid.size_v() {
        return Err(FitError::InvalidGrid(format!(
            "basis rows ({}, {}) do not match grid {}x{}",
            basis_u.nrows(),
            basis_v.nrows(),
            grid.size_u(),
            grid.size_v()
        )));
    }
    if basis_u.ncols() == 0 || basis_v.ncols() == 0 {
        return Err(FitError::InvalidGrid("empty basis".into()));
    }

    let pinv_u = left_pseudo_inverse(basis_u, "u")?;
    let pinv_v = left_pseudo_inverse(basis_v, "v")?;

    let rows = basis_u.ncols();
    let cols = basis_v.ncols();
    let mut points = vec![Point3::origin(); rows * cols];
    for axis in 0..3 {
        let samples = DMatrix::from_fn(grid.size_u(), grid.size_v(), |i, j| grid.at(i, j)[axis]);
        let coeffs = &pinv_u * samples * pinv_v.transpose();
        for i in 0..rows {
            for j in 0..cols {
                points[i * cols + j][axis] = coeffs[(i, j)];
            }
        }
    }

    let control = BezierControlGrid::new(rows - 1, cols - 1, points)?;
    if !control.is_finite() {
        return Err(FitError::NonFinite);
    }
    Ok(control)
}

/// Parametrize `grid`, build basis matrices and fit a
/// `degree_u × degree_v` patch.
pub fn fit_surface(
    grid: &StructuredGrid,
    degree_u: usize,
    degree_v: usize,
    method: ParametrizationMethod,
) -> Result<BezierControlGrid> {
    check_degree(degree_u, grid.size_u())?;
    check_degree(degree_v, grid.size_v())?;

    let (u, v) = compute_averaging_params_surface(grid, method)?;
    let basis_u = basis_matrix(&u, degree_u);
    let basis_v = basis_matrix(&v, degree_v);
    let control = fit_bezier_surface(grid, &basis_u, &basis_v)?;
    log::debug!(
        "fitted {}x{} control grid to {}x{} samples",
        degree_u + 1,
        degree_v + 1,
        grid.size_u(),
        grid.size_v()
    );
    Ok(control)
}

fn check_degree(degree: usize, samples: usize) -> Result<()> {
    if degree == 0 || degree >= samples {
        return Err(FitError::InvalidDegree { degree, samples });
    }
    Ok(())
}

/// `(NᵀN)⁻¹Nᵀ`, rejecting ill-conditioned normal matrices.
fn left_pseudo_inverse(n: &DMatrix<f64>, direction: &'static str) -> Result<DMatrix<f64>> {
    let nt = n.transpose();
    let normal = &nt * n;

    let eigen = SymmetricEigen::new(normal.clone());
    let max = eigen.eigenvalues.max();
    let min = eigen.eigenvalues.min();
    if !(max > 0.0) || min / max < MIN_CONDITION_RATIO {
        return Err(FitError::SingularFit { direction });
    }

    let chol = Cholesky::new(normal).ok_or(FitError::SingularFit { direction })?;
    Ok(chol.solve(&nt))
}
