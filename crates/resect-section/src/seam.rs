//! Seam selection for closed rings.

use crate::error::{Result, SectionError};
use resect_contour::rotate_to_start;
use resect_math::{farthest_index, BoundingBox, Plane, Point3, PrincipalAxes, Vec3};

/// Where a closed ring is cut open.
#[derive(Debug, Clone)]
pub struct Seam {
    /// Index of the seam point in the input ring.
    pub index: usize,
    /// Plane the ring was projected onto to find it.
    pub plane: Plane,
}

/// Pick the seam point of a closed ring.
///
/// The ring is projected onto a plane whose normal is its major principal
/// axis, placed one bounding-box diagonal below the centroid; the seam is the
/// point whose projection lies farthest from the projected centroid.
pub fn select_seam(points: &[Point3]) -> Result<Seam> {
    if points.len() < 3 {
        return Err(SectionError::TooFewPoints {
            found: points.len(),
            required: 3,
        });
    }
    let pca = PrincipalAxes::from_points(points)
        .ok_or_else(|| SectionError::Degenerate("principal axes undefined".into()))?;
    let diagonal = BoundingBox::from_points(points)
        .map(|bb| bb.diagonal_length())
        .unwrap_or_default();

    let origin = pca.center - Vec3::from_element(diagonal);
    let plane = Plane::new(origin, pca.major())
        .ok_or_else(|| SectionError::Degenerate("ring has no principal axis".into()))?;

    let projected = plane.project_points(points);
    let center = plane.project_point(&pca.center);
    let index = farthest_index(&projected, &center)
        .ok_or_else(|| SectionError::Degenerate("empty projection".into()))?;
    Ok(Seam { index, plane })
}

/// Rotate a closed ring so it starts at its seam.
pub fn align_to_seam(points: &[Point3]) -> Result<(Vec<Point3>, Seam)> {
    let seam = select_seam(points)?;
    Ok((rotate_to_start(points, seam.index), seam))
}
