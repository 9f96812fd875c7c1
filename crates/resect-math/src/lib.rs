#![warn(missing_docs)]

//! Math types for the resection surface engine.
//!
//! Thin wrappers around nalgebra providing the point, plane and
//! principal-axis helpers shared by the contour, Fourier, cross-section
//! and Bézier crates.

use nalgebra::{Matrix3, SymmetricEigen, Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Arithmetic mean of a point set, `None` if the set is empty.
pub fn centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Index of the point farthest from `from`, `None` if the set is empty.
pub fn farthest_index(points: &[Point3], from: &Point3) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, distance(p, from)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

// =============================================================================
// Bounding box
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Bounding box of a point set, `None` if the set is empty.
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    /// Length of the box diagonal.
    pub fn diagonal_length(&self) -> f64 {
        (self.max - self.min).norm()
    }

    /// Whether `p` lies inside the box, grown by `margin` on every side.
    pub fn contains(&self, p: &Point3, margin: f64) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] - margin && p[i] <= self.max[i] + margin)
    }
}

// =============================================================================
// Plane
// =============================================================================

/// An infinite plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// A point on the plane.
    pub origin: Point3,
    /// Unit normal.
    pub normal: Dir3,
}

impl Plane {
    /// Create a plane, normalizing `normal`.
    ///
    /// Returns `None` for a zero-length normal.
    pub fn new(origin: Point3, normal: Vec3) -> Option<Self> {
        let normal = Dir3::try_new(normal, Tolerance::DEFAULT.linear)?;
        Some(Self { origin, normal })
    }

    /// Signed distance from the plane to `p` along the normal.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(self.normal.as_ref())
    }

    /// Orthogonal projection of `p` onto the plane.
    pub fn project_point(&self, p: &Point3) -> Point3 {
        p - self.signed_distance(p) * self.normal.as_ref()
    }

    /// Project every point of a set onto the plane.
    pub fn project_points(&self, points: &[Point3]) -> Vec<Point3> {
        points.iter().map(|p| self.project_point(p)).collect()
    }
}

// =============================================================================
// Principal component analysis
// =============================================================================

/// Principal axes of a point set, sorted by decreasing variance.
#[derive(Debug, Clone)]
pub struct PrincipalAxes {
    /// Centroid of the points.
    pub center: Point3,
    /// Unit eigenvectors of the covariance matrix, largest variance first.
    pub axes: [Vec3; 3],
    /// Matching eigenvalues (sample variances), descending.
    pub variances: [f64; 3],
}

impl PrincipalAxes {
    /// Compute the principal axes of `points`.
    ///
    /// Uses the unbiased sample covariance, so at least two points are
    /// required; returns `None` otherwise or when the covariance has
    /// non-finite entries.
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let center = centroid(points)?;
        let mut cov = Matrix3::zeros();
        for p in points {
            let d = p - center;
            cov += d * d.transpose();
        }
        cov /= (points.len() - 1) as f64;
        if cov.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let eigen = SymmetricEigen::new(cov);
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

        let axes = order.map(|i| eigen.eigenvectors.column(i).into_owned());
        // Round-off can push a zero eigenvalue slightly negative.
        let variances = order.map(|i| eigen.eigenvalues[i].max(0.0));
        Some(Self {
            center,
            axes,
            variances,
        })
    }

    /// Direction of largest variance.
    pub fn major(&self) -> Vec3 {
        self.axes[0]
    }

    /// Largest variance.
    pub fn major_variance(&self) -> f64 {
        self.variances[0]
    }
}

/// Flip each vector so it points into the same half-space as `reference`.
///
/// Eigenvectors carry an arbitrary sign; aligning them first keeps an
/// average of nearly parallel axes from cancelling out.
pub fn align_with(vectors: &[Vec3], reference: &Vec3) -> Vec<Vec3> {
    vectors
        .iter()
        .map(|v| if v.dot(reference) < 0.0 { -v } else { *v })
        .collect()
}

// =============================================================================
// Tolerances
// =============================================================================

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 model units).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        distance(a, b) < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert_relative_eq!(distance(&a, &b), 5.0);
        assert_relative_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_centroid_and_bounds() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 2.0),
        ];
        let c = centroid(&pts).unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 2.0);
        assert_relative_eq!(c.z, 0.5);

        let bb = BoundingBox::from_points(&pts).unwrap();
        assert_relative_eq!(bb.diagonal_length(), (4.0f64 + 16.0 + 4.0).sqrt());
        assert!(bb.contains(&Point3::new(1.0, 1.0, 1.0), 0.0));
        assert!(!bb.contains(&Point3::new(3.0, 1.0, 1.0), 0.5));

        assert!(centroid(&[]).is_none());
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_plane_projection() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 2.0)).unwrap();
        let p = Point3::new(1.0, -2.0, 9.0);
        assert_relative_eq!(plane.signed_distance(&p), 4.0);

        let q = plane.project_point(&p);
        assert_relative_eq!(q.x, 1.0);
        assert_relative_eq!(q.y, -2.0);
        assert_relative_eq!(q.z, 5.0);

        assert!(Plane::new(Point3::origin(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_pca_of_line() {
        let pts: Vec<Point3> = (0..21)
            .map(|i| {
                let t = i as f64 / 20.0;
                Point3::new(1.0 + 2.0 * t, 1.0 + 2.0 * t, 5.0)
            })
            .collect();
        let pca = PrincipalAxes::from_points(&pts).unwrap();

        let major = pca.major();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(major.dot(&expected).abs(), 1.0, epsilon = 1e-9);
        assert!(pca.variances[1] < 1e-12);
        assert_relative_eq!(pca.center.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(pca.center.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pca_variances_descending() {
        let pts: Vec<Point3> = (0..64)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 64.0;
                Point3::new(6.0 * a.cos(), 2.0 * a.sin(), 0.5 * (2.0 * a).sin())
            })
            .collect();
        let pca = PrincipalAxes::from_points(&pts).unwrap();
        assert!(pca.variances[0] >= pca.variances[1]);
        assert!(pca.variances[1] >= pca.variances[2]);
        assert_relative_eq!(pca.major().x.abs(), 1.0, epsilon = 1e-9);

        assert!(PrincipalAxes::from_points(&pts[..1]).is_none());
    }

    #[test]
    fn test_align_with_flips_opposite_vectors() {
        let reference = Vec3::x();
        let aligned = align_with(&[Vec3::new(-1.0, 0.1, 0.0), Vec3::new(1.0, -0.1, 0.0)], &reference);
        assert!(aligned.iter().all(|v| v.x > 0.0));
        let avg = (aligned[0] + aligned[1]) / 2.0;
        assert_relative_eq!(avg.x, 1.0);
    }

    #[test]
    fn test_farthest_index() {
        let pts = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-3.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        assert_eq!(farthest_index(&pts, &Point3::origin()), Some(1));
        assert_eq!(farthest_index(&[], &Point3::origin()), None);
    }
}
