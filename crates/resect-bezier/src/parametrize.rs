//! Parametrization of point sequences and structured grids.

use crate::error::{FitError, Result};
use crate::grid::StructuredGrid;
use resect_math::{distance, Point3};
use serde::{Deserialize, Serialize};

/// How parameter values are assigned along a point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParametrizationMethod {
    /// Cumulative chord length.
    #[default]
    ChordLength,
    /// Cumulative square root of chord length.
    Centripetal,
}

/// Chord-length parameters of a point sequence, normalized to `[0, 1]`.
///
/// Returns `None` when the sequence has zero total length.
pub fn chord_length(points: &[Point3]) -> Option<Vec<f64>> {
    cumulative_normalized(points, |d| d)
}

/// Centripetal parameters: like [`chord_length`] but summing the square root
/// of each segment length, which damps the effect of uneven spacing.
pub fn centripetal(points: &[Point3]) -> Option<Vec<f64>> {
    cumulative_normalized(points, f64::sqrt)
}

/// Parameters of a point sequence with the chosen method.
pub fn parametrize(points: &[Point3], method: ParametrizationMethod) -> Option<Vec<f64>> {
    match method {
        ParametrizationMethod::ChordLength => chord_length(points),
        ParametrizationMethod::Centripetal => centripetal(points),
    }
}

fn cumulative_normalized(points: &[Point3], weight: impl Fn(f64) -> f64) -> Option<Vec<f64>> {
    if points.len() < 2 {
        return None;
    }
    let mut u = Vec::with_capacity(points.len());
    u.push(0.0);
    for w in points.windows(2) {
        let last = u[u.len() - 1];
        u.push(last + weight(distance(&w[0], &w[1])));
    }
    let total = u[u.len() - 1];
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    for v in &mut u {
        *v /= total;
    }
    Some(u)
}

/// Shared `(u, v)` parameter vectors for a whole grid.
///
/// `u` (length `size_u`) averages the parametrizations of every column, `v`
/// (length `size_v`) those of every row. Lines of zero length are skipped; the
/// direction fails only if every line in it is degenerate.
pub fn compute_averaging_params_surface(
    grid: &StructuredGrid,
    method: ParametrizationMethod,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let u = average_params(
        (0..grid.size_v()).map(|j| grid.column(j)),
        grid.size_u(),
        method,
    )
    .ok_or(FitError::DegenerateParametrization { direction: "u" })?;
    let v = average_params(
        (0..grid.size_u()).map(|i| grid.row(i).to_vec()),
        grid.size_v(),
        method,
    )
    .ok_or(FitError::DegenerateParametrization { direction: "v" })?;
    Ok((u, v))
}

fn average_params(
    lines: impl Iterator<Item = Vec<Point3>>,
    len: usize,
    method: ParametrizationMethod,
) -> Option<Vec<f64>> {
    let mut sum = vec![0.0; len];
    let mut used = 0usize;
    let mut total = 0usize;
    for line in lines {
        total += 1;
        if let Some(params) = parametrize(&line, method) {
            for (s, p) in sum.iter_mut().zip(params) {
                *s += p;
            }
            used += 1;
        }
    }
    if used == 0 {
        return None;
    }
    if used < total {
        log::debug!("skipped {} degenerate lines of {total}", total - used);
    }
    Some(sum.into_iter().map(|s| s / used as f64).collect())
}
