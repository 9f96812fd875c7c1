#![warn(missing_docs)]

//! Bézier surface fitting for the resection surface engine.
//!
//! A [`StructuredGrid`] of sampled points is parametrized
//! ([`compute_averaging_params_surface`]), projected onto a Bernstein basis
//! ([`basis_matrix`]) and solved in the least-squares sense
//! ([`fit_bezier_surface`]). The resulting [`BezierControlGrid`] can be
//! evaluated and tessellated through [`BezierSurface`].

pub mod basis;
pub mod error;
pub mod fit;
pub mod grid;
pub mod parametrize;
pub mod surface;

pub use basis::{basis_matrix, evaluate_basis_bezier};
pub use error::{FitError, Result};
pub use fit::{fit_bezier_surface, fit_surface};
pub use grid::StructuredGrid;
pub use parametrize::{
    centripetal, chord_length, compute_averaging_params_surface, parametrize,
    ParametrizationMethod,
};
pub use surface::{BezierControlGrid, BezierSurface, SurfaceTessellation};
