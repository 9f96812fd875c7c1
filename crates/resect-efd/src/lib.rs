#![warn(missing_docs)]

//! Elliptic Fourier descriptors of 3D contours.
//!
//! A contour is expanded into harmonically related ellipses parametrized by
//! normalized arc length (Kuhl & Giardina, extended to three axes). The crate
//! covers the full round trip used by the resection pipeline:
//!
//! - [`elliptic_fourier_descriptors`]: points → `order × 6` coefficient table
//! - [`dc_offset`]: the zero-harmonic term anchoring the reconstruction
//! - [`nyquist`] and [`fourier_power`]: adaptive harmonic-count selection
//! - [`inverse_transform`]: coefficients → smoothed closed curve
//! - [`normalize`]: rotation/size-invariant form of a coefficient table

pub mod error;

pub use error::{EfdError, Result};

use nalgebra::{Matrix3, Vector3};
use resect_math::{distance, Point3};
use std::f64::consts::PI;

/// Default fraction of total energy the selected harmonics must capture.
pub const DEFAULT_ENERGY_THRESHOLD: f64 = 0.9999;

// =============================================================================
// Coefficient tables
// =============================================================================

/// Coefficients of one harmonic: `[a, b, c, d, e, f]`.
///
/// `a, b` are the cosine/sine amplitudes along x, `c, d` along y and `e, f`
/// along z.
pub type Harmonic = [f64; 6];

/// An `order × 6` table of harmonic coefficients, row `n - 1` holding
/// harmonic `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicCoefficients {
    rows: Vec<Harmonic>,
}

impl HarmonicCoefficients {
    /// Wrap an existing table.
    pub fn from_rows(rows: Vec<Harmonic>) -> Self {
        Self { rows }
    }

    /// Number of harmonics in the table.
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    /// Coefficients of harmonic `n` (1-based).
    pub fn harmonic(&self, n: usize) -> Option<&Harmonic> {
        n.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    /// All rows, harmonic 1 first.
    pub fn rows(&self) -> &[Harmonic] {
        &self.rows
    }

    /// Energy of harmonic `n`: `(a² + b² + c² + d² + e² + f²) / 3`.
    pub fn power(&self, n: usize) -> f64 {
        self.harmonic(n)
            .map_or(0.0, |h| h.iter().map(|c| c * c).sum::<f64>() / 3.0)
    }
}

/// True-origin correction `(A0, C0, E0)` of a reconstructed curve.
///
/// Already includes the first point of the source path, so it can be used
/// directly as the reconstruction locus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcOffset {
    /// x offset.
    pub a0: f64,
    /// y offset.
    pub c0: f64,
    /// z offset.
    pub e0: f64,
}

impl DcOffset {
    /// The offset as a point.
    pub fn as_point(&self) -> Point3 {
        Point3::new(self.a0, self.c0, self.e0)
    }
}

impl From<Point3> for DcOffset {
    fn from(p: Point3) -> Self {
        Self {
            a0: p.x,
            c0: p.y,
            e0: p.z,
        }
    }
}

// =============================================================================
// Arc-length bookkeeping
// =============================================================================

/// Per-segment deltas and cumulative arc length of a point sequence.
struct ArcLength {
    /// `P[i+1] - P[i]` per axis.
    deltas: Vec<[f64; 3]>,
    /// Segment lengths.
    dt: Vec<f64>,
    /// Cumulative length, `t[0] = 0`, `t.len() == dt.len() + 1`.
    t: Vec<f64>,
}

impl ArcLength {
    fn new(points: &[Point3]) -> Result<Self> {
        if points.len() < 2 {
            return Err(EfdError::TooFewPoints {
                found: points.len(),
                required: 2,
            });
        }
        let mut deltas = Vec::with_capacity(points.len() - 1);
        let mut dt = Vec::with_capacity(points.len() - 1);
        let mut t = Vec::with_capacity(points.len());
        t.push(0.0);
        for (i, w) in points.windows(2).enumerate() {
            let d = distance(&w[0], &w[1]);
            if d == 0.0 {
                return Err(EfdError::ZeroLengthSegment { index: i });
            }
            let delta = w[1] - w[0];
            deltas.push([delta.x, delta.y, delta.z]);
            dt.push(d);
            t.push(t[i] + d);
        }
        Ok(Self { deltas, dt, t })
    }

    fn total(&self) -> f64 {
        self.t[self.t.len() - 1]
    }
}

// =============================================================================
// Forward transform
// =============================================================================

/// Largest harmonic order representable by `n_points` samples.
pub fn nyquist(n_points: usize) -> usize {
    n_points / 2
}

/// Fit `order` harmonics to a point sequence.
///
/// The sequence is parametrized by cumulative chord length; it need not be
/// closed; the expansion treats it as one period. Requires
/// `1 <= order <= nyquist(points.len())` and no repeated consecutive points.
pub fn elliptic_fourier_descriptors(
    points: &[Point3],
    order: usize,
) -> Result<HarmonicCoefficients> {
    let max = nyquist(points.len());
    if order == 0 || order > max {
        return Err(EfdError::InvalidOrder { order, max });
    }
    let arc = ArcLength::new(points)?;
    let period = arc.total();

    // Unit tangent per segment, shared by every harmonic.
    let slopes: Vec<[f64; 3]> = arc
        .deltas
        .iter()
        .zip(&arc.dt)
        .map(|(d, &dt)| [d[0] / dt, d[1] / dt, d[2] / dt])
        .collect();

    let mut rows = Vec::with_capacity(order);
    for n in 1..=order {
        let nf = n as f64;
        let scale = period / (2.0 * nf * nf * PI * PI);
        let mut row = [0.0; 6];
        let mut phi_prev = 0.0f64;
        for (i, slope) in slopes.iter().enumerate() {
            let phi = 2.0 * PI * nf * arc.t[i + 1] / period;
            let d_cos = phi.cos() - phi_prev.cos();
            let d_sin = phi.sin() - phi_prev.sin();
            for axis in 0..3 {
                row[2 * axis] += slope[axis] * d_cos;
                row[2 * axis + 1] += slope[axis] * d_sin;
            }
            phi_prev = phi;
        }
        for c in &mut row {
            *c *= scale;
        }
        rows.push(row);
    }
    Ok(HarmonicCoefficients { rows })
}

/// Zero-harmonic offset of a point sequence, anchored at its first point.
///
/// The harmonic expansion has zero mean, so the reconstruction must be shifted
/// by the arc-length-weighted mean position returned here.
pub fn dc_offset(points: &[Point3]) -> Result<DcOffset> {
    let arc = ArcLength::new(points)?;
    let period = arc.total();

    let mut offset = [0.0; 3];
    for (axis, value) in offset.iter_mut().enumerate() {
        let mut running = 0.0;
        let mut sum = 0.0;
        for (i, d) in arc.deltas.iter().enumerate() {
            let slope = d[axis] / arc.dt[i];
            running += d[axis];
            let xi = running - slope * arc.t[i + 1];
            let t_sq_diff = arc.t[i + 1] * arc.t[i + 1] - arc.t[i] * arc.t[i];
            sum += 0.5 * slope * t_sq_diff + xi * arc.dt[i];
        }
        *value = sum / period;
    }

    let first = points[0];
    Ok(DcOffset {
        a0: first.x + offset[0],
        c0: first.y + offset[1],
        e0: first.z + offset[2],
    })
}

// =============================================================================
// Harmonic-count selection
// =============================================================================

/// Smallest harmonic count whose cumulative energy exceeds `threshold` of the
/// total.
///
/// Energy is summed over harmonics `1..=nyquist(n_points)` (or the table's
/// order, if smaller). The result never exceeds that limit; if the threshold
/// is never crossed (e.g. `threshold >= 1`), the limit itself is returned.
pub fn fourier_power(coeffs: &HarmonicCoefficients, n_points: usize, threshold: f64) -> Result<usize> {
    let limit = nyquist(n_points).min(coeffs.order());
    if limit == 0 {
        return Err(EfdError::InvalidOrder { order: 0, max: 0 });
    }
    let total: f64 = (1..=limit).map(|n| coeffs.power(n)).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(EfdError::ZeroPower);
    }

    let mut cumulative = 0.0;
    for n in 1..=limit {
        cumulative += coeffs.power(n);
        if cumulative / total > threshold {
            return Ok(n);
        }
    }
    Ok(limit)
}

/// Fit at the Nyquist order, pick the harmonic count by energy, then refit.
///
/// Returns the refitted table (of the selected order) and that order.
pub fn fit_adaptive(points: &[Point3], threshold: f64) -> Result<(HarmonicCoefficients, usize)> {
    let max = nyquist(points.len());
    let full = elliptic_fourier_descriptors(points, max)?;
    let harmonic = fourier_power(&full, points.len(), threshold)?;
    log::debug!(
        "selected {harmonic} of {max} harmonics at energy threshold {threshold}"
    );
    let coeffs = elliptic_fourier_descriptors(points, harmonic)?;
    Ok((coeffs, harmonic))
}

// =============================================================================
// Inverse transform
// =============================================================================

/// Reconstruct `n_coords` points from the first `harmonic` rows of `coeffs`.
///
/// Samples are taken at `n_coords` evenly spaced parameters over `[0, 1]`
/// (both ends included), so the result is a closed curve whose first and last
/// points coincide.
pub fn inverse_transform(
    coeffs: &HarmonicCoefficients,
    locus: DcOffset,
    n_coords: usize,
    harmonic: usize,
) -> Result<Vec<Point3>> {
    if harmonic > coeffs.order() {
        return Err(EfdError::InvalidOrder {
            order: harmonic,
            max: coeffs.order(),
        });
    }
    let origin = locus.as_point();
    let denom = n_coords.saturating_sub(1).max(1) as f64;

    let points = (0..n_coords)
        .map(|k| {
            let tau = k as f64 / denom;
            let mut p = origin;
            for (i, h) in coeffs.rows[..harmonic].iter().enumerate() {
                let angle = 2.0 * PI * (i + 1) as f64 * tau;
                let (s, c) = angle.sin_cos();
                p.x += h[0] * c + h[1] * s;
                p.y += h[2] * c + h[3] * s;
                p.z += h[4] * c + h[5] * s;
            }
            p
        })
        .collect();
    Ok(points)
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a coefficient table against the orientation of its first
/// harmonic (Bose's 3D extension of the Kuhl–Giardina normalization).
///
/// The basis `[u | v | u × v]` built from the first harmonic's cosine column
/// `u = (a, c, e)` and sine column `v = (b, d, f)` is inverted and applied to
/// every harmonic, so the first harmonic becomes `(1, 0, 0, 1, 0, 0)` before
/// scaling. Returns the table and the size `|u|`; with `size_invariant` the
/// table is divided by that size.
pub fn normalize(coeffs: &HarmonicCoefficients, size_invariant: bool) -> Result<(HarmonicCoefficients, f64)> {
    let first = coeffs.harmonic(1).ok_or(EfdError::InvalidOrder { order: 1, max: 0 })?;
    let u = Vector3::new(first[0], first[2], first[4]);
    let v = Vector3::new(first[1], first[3], first[5]);
    let basis = Matrix3::from_columns(&[u, v, u.cross(&v)]);
    let inverse = basis.try_inverse().ok_or(EfdError::SingularNormalization)?;

    let size = u.norm();
    let scale = if size_invariant && size > 0.0 { 1.0 / size } else { 1.0 };

    let rows = coeffs
        .rows
        .iter()
        .map(|h| {
            let cos_col = inverse * Vector3::new(h[0], h[2], h[4]) * scale;
            let sin_col = inverse * Vector3::new(h[1], h[3], h[5]) * scale;
            [cos_col.x, sin_col.x, cos_col.y, sin_col.y, cos_col.z, sin_col.z]
        })
        .collect();
    Ok((HarmonicCoefficients { rows }, size))
}
