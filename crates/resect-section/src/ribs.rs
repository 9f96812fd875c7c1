//! Ribs: chords joining the two sides of a seam-aligned ring.

use crate::error::{Result, SectionError};
use resect_math::{align_with, Point3, PrincipalAxes, Tolerance, Vec3};

/// Local frame of one rib from its principal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibFrame {
    /// Centroid of the rib samples.
    pub center: Point3,
    /// Major principal axis (unit length, arbitrary sign).
    pub direction: Vec3,
    /// Variance along `direction`.
    pub variance: f64,
}

/// Pair a seam-aligned ring from both ends inward and sample each pair.
///
/// Rib `j` runs from `ring[j]` to `ring[n - 1 - j]` and holds
/// `resolution + 1` evenly spaced points; an odd middle point is left out.
pub fn build_ribs(ring: &[Point3], resolution: usize) -> Result<Vec<Vec<Point3>>> {
    if ring.len() < 2 {
        return Err(SectionError::TooFewPoints {
            found: ring.len(),
            required: 2,
        });
    }
    if resolution == 0 {
        return Err(SectionError::InvalidSetting(
            "rib resolution must be positive".into(),
        ));
    }

    let n = ring.len();
    let ribs = (0..n / 2)
        .map(|j| {
            let a = ring[j];
            let b = ring[n - 1 - j];
            (0..=resolution)
                .map(|k| a + (b - a) * (k as f64 / resolution as f64))
                .collect()
        })
        .collect();
    Ok(ribs)
}

/// Principal frame of every rib.
pub fn rib_frames(ribs: &[Vec<Point3>]) -> Result<Vec<RibFrame>> {
    ribs.iter()
        .enumerate()
        .map(|(i, rib)| {
            let pca = PrincipalAxes::from_points(rib)
                .ok_or_else(|| SectionError::Degenerate(format!("rib {i} has no principal axes")))?;
            Ok(RibFrame {
                center: pca.center,
                direction: pca.major(),
                variance: pca.major_variance(),
            })
        })
        .collect()
}

/// Average sweep direction over the central ribs.
///
/// The first and last `end_exclusion` frames are left out when enough frames
/// remain; collapsed ribs (zero variance) never vote. Directions are flipped
/// into a common half-space before averaging.
pub fn average_direction(frames: &[RibFrame], end_exclusion: usize) -> Result<Vec3> {
    let window = if frames.len() > 2 * end_exclusion {
        &frames[end_exclusion..frames.len() - end_exclusion]
    } else {
        frames
    };
    let directions: Vec<Vec3> = window
        .iter()
        .filter(|f| !Tolerance::DEFAULT.is_zero(f.variance))
        .map(|f| f.direction)
        .collect();
    let reference = directions
        .first()
        .copied()
        .ok_or_else(|| SectionError::Degenerate("every rib collapsed to a point".into()))?;

    let sum = align_with(&directions, &reference)
        .into_iter()
        .fold(Vec3::zeros(), |acc, d| acc + d);
    let norm = sum.norm();
    if Tolerance::DEFAULT.is_zero(norm) {
        return Err(SectionError::Degenerate("rib directions cancel out".into()));
    }
    Ok(sum / norm)
}
