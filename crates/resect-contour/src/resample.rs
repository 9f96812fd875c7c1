//! Closed-curve cleanup and uniform arc-length resampling.

use crate::error::{ContourError, Result};
use resect_math::{distance, Point3, Tolerance};

/// Drop points that coincide with their predecessor.
///
/// With `closed` set, a trailing point equal to the first one is dropped too,
/// so a curve sampled over a full period keeps a single copy of its seam.
pub fn dedup_consecutive(points: &[Point3], closed: bool, tol: Tolerance) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map_or(true, |q| !tol.points_equal(p, q)) {
            out.push(*p);
        }
    }
    if closed && out.len() > 1 && tol.points_equal(&out[0], &out[out.len() - 1]) {
        out.pop();
    }
    out
}

/// Rotate a closed point sequence so that it begins at `start`.
pub fn rotate_to_start(points: &[Point3], start: usize) -> Vec<Point3> {
    if points.is_empty() {
        return Vec::new();
    }
    let start = start % points.len();
    points[start..].iter().chain(&points[..start]).copied().collect()
}

/// Perimeter of a closed polygon, including the closing segment.
pub fn closed_length(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| distance(&points[i], &points[(i + 1) % n])).sum()
}

/// Resample a closed curve to `count` points evenly spaced by arc length.
///
/// The curve is treated as a closed polygon through `points` (the closing
/// segment back to `points[0]` is implied). The first output point is
/// `points[0]`; the seam point is not repeated at the end.
pub fn resample_closed(points: &[Point3], count: usize) -> Result<Vec<Point3>> {
    if count == 0 {
        return Err(ContourError::InvalidParameter(
            "resample count must be positive".into(),
        ));
    }
    if points.len() < 2 {
        return Err(ContourError::TooFewPoints {
            found: points.len(),
            required: 2,
        });
    }
    let total = closed_length(points);
    if Tolerance::DEFAULT.is_zero(total) {
        return Err(ContourError::DegenerateCurve(
            "closed curve has zero length".into(),
        ));
    }

    let n = points.len();
    let step = total / count as f64;
    let mut out = Vec::with_capacity(count);

    // Walk the polygon once, emitting a sample every `step` of arc length.
    let mut seg = 0;
    let mut seg_start = 0.0;
    let mut seg_len = distance(&points[0], &points[1]);
    for k in 0..count {
        let target = k as f64 * step;
        while target > seg_start + seg_len && seg < n - 1 {
            seg_start += seg_len;
            seg += 1;
            seg_len = distance(&points[seg], &points[(seg + 1) % n]);
        }
        let a = points[seg];
        let b = points[(seg + 1) % n];
        let t = if seg_len > 0.0 {
            ((target - seg_start) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(a + (b - a) * t);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn test_dedup_consecutive() {
        let pts = vec![
            Point3::origin(),
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::origin(),
        ];
        let open = dedup_consecutive(&pts, false, Tolerance::DEFAULT);
        assert_eq!(open.len(), 4);
        let closed = dedup_consecutive(&pts, true, Tolerance::DEFAULT);
        assert_eq!(closed.len(), 3);
    }

    #[test]
    fn test_rotate_to_start() {
        let pts = square();
        let rotated = rotate_to_start(&pts, 2);
        assert_eq!(rotated[0], pts[2]);
        assert_eq!(rotated[1], pts[3]);
        assert_eq!(rotated[2], pts[0]);
        assert_eq!(rotate_to_start(&pts, 4), pts);
    }

    #[test]
    fn test_resample_square() {
        let out = resample_closed(&square(), 8).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(out[0], Point3::origin());
        assert_relative_eq!(out[1].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[2].x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(out[3].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[7].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[7].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(closed_length(&out), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_resample_uneven_spacing() {
        // Dense on one side, sparse on the other: output spacing is uniform.
        let mut pts: Vec<Point3> = (0..10).map(|i| Point3::new(i as f64 * 0.1, 0.0, 0.0)).collect();
        pts.push(Point3::new(1.0, 1.0, 0.0));
        pts.push(Point3::new(0.0, 1.0, 0.0));
        let out = resample_closed(&pts, 16).unwrap();
        let gaps: Vec<f64> = (0..16).map(|i| distance(&out[i], &out[(i + 1) % 16])).collect();
        let expected = closed_length(&pts) / 16.0;
        for g in gaps {
            assert!(g <= expected + 1e-9);
        }
    }

    #[test]
    fn test_resample_errors() {
        assert!(matches!(
            resample_closed(&[Point3::origin()], 10),
            Err(ContourError::TooFewPoints { found: 1, .. })
        ));
        assert!(matches!(
            resample_closed(&[Point3::origin(), Point3::origin()], 10),
            Err(ContourError::DegenerateCurve(_))
        ));
        assert!(resample_closed(&square(), 0).is_err());
    }
}
