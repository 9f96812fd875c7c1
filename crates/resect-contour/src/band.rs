//! Distance-band extraction from a surface mesh.

use resect_math::{distance, BoundingBox, Point3};

/// A read-only triangle mesh supplied by the caller.
///
/// Only the vertex positions are used here; the triangle list is carried so
/// callers can hand over the mesh they already have without reshaping it.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    /// Vertex positions.
    pub points: Vec<Point3>,
    /// Triangle vertex indices.
    pub triangles: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Create a mesh from vertices and triangles.
    pub fn new(points: Vec<Point3>, triangles: Vec<[u32; 3]>) -> Self {
        Self { points, triangles }
    }

    /// A mesh with vertices only.
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self {
            points,
            triangles: Vec::new(),
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

/// Selection of mesh points lying at a given distance from a reference point.
#[derive(Debug, Clone, Copy)]
pub struct BandQuery {
    /// Reference point the distance is measured from.
    pub center: Point3,
    /// Target radial distance.
    pub radius: f64,
    /// Half-width of the accepted distance interval.
    pub thickness: f64,
}

impl BandQuery {
    /// Create a band query.
    pub fn new(center: Point3, radius: f64, thickness: f64) -> Self {
        Self {
            center,
            radius,
            thickness,
        }
    }

    /// Whether `q` lies strictly inside the band.
    pub fn contains(&self, q: &Point3) -> bool {
        (distance(q, &self.center) - self.radius).abs() < self.thickness
    }

    /// Extract the band from a mesh. See [`extract_band`].
    pub fn extract(&self, mesh: &SurfaceMesh) -> Vec<Point3> {
        extract_band(&mesh.points, self)
    }
}

/// Collect every point `q` with `| |q - center| - radius | < thickness`.
///
/// Input order is preserved but carries no meaning. An empty result is not
/// an error here; callers reject it before ordering.
pub fn extract_band(points: &[Point3], query: &BandQuery) -> Vec<Point3> {
    let band: Vec<Point3> = points.iter().filter(|q| query.contains(q)).copied().collect();
    log::debug!(
        "band at r={} ±{}: {} of {} points",
        query.radius,
        query.thickness,
        band.len(),
        points.len()
    );
    band
}
