//! Structured grid construction from a closed ring.

use crate::error::{Result, SectionError};
use crate::ribs::{average_direction, build_ribs, rib_frames, RibFrame};
use crate::seam::{align_to_seam, Seam};
use resect_bezier::StructuredGrid;
use resect_contour::{closed_length, dedup_consecutive, resample_closed};
use resect_math::{Point3, PrincipalAxes, Tolerance, Vec3};

/// Tunables for [`build_cross_sections`].
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionSettings {
    /// Number of ribs, and rows of the emitted grid.
    pub cross_sections: usize,
    /// Segments per rib; each rib holds `rib_resolution + 1` samples.
    pub rib_resolution: usize,
    /// Samples along each emitted row.
    pub samples_per_section: usize,
    /// Ribs skipped at each end when averaging the sweep direction.
    pub end_exclusion: usize,
    /// Row length as a multiple of the ring's major standard deviation.
    pub extent_scale: f64,
}

impl Default for CrossSectionSettings {
    fn default() -> Self {
        Self {
            cross_sections: 50,
            rib_resolution: 20,
            samples_per_section: 50,
            end_exclusion: 4,
            extent_scale: 4.0,
        }
    }
}

impl CrossSectionSettings {
    /// Check that every setting is in range.
    pub fn validate(&self) -> Result<()> {
        if self.cross_sections < 2 {
            return Err(SectionError::InvalidSetting(format!(
                "need at least 2 cross-sections, got {}",
                self.cross_sections
            )));
        }
        if self.samples_per_section < 2 {
            return Err(SectionError::InvalidSetting(format!(
                "need at least 2 samples per section, got {}",
                self.samples_per_section
            )));
        }
        if self.rib_resolution == 0 {
            return Err(SectionError::InvalidSetting(
                "rib resolution must be positive".into(),
            ));
        }
        if !(self.extent_scale > 0.0) || !self.extent_scale.is_finite() {
            return Err(SectionError::InvalidSetting(format!(
                "extent scale must be positive, got {}",
                self.extent_scale
            )));
        }
        Ok(())
    }
}

/// Output of [`build_cross_sections`].
#[derive(Debug, Clone)]
pub struct CrossSections {
    /// `cross_sections × samples_per_section` grid, one row per rib.
    pub grid: StructuredGrid,
    /// Seam-aligned ring the ribs were built from.
    pub ring: Vec<Point3>,
    /// Where the input ring was cut open.
    pub seam: Seam,
    /// Per-rib centers and axes.
    pub frames: Vec<RibFrame>,
    /// Averaged sweep direction shared by every row.
    pub sweep_direction: Vec3,
    /// Length of every row.
    pub extent: f64,
}

/// Slice a closed ring into a structured grid of parallel cross-sections.
///
/// The ring is cleaned of repeated points, cut at its seam and resampled to
/// `2 × cross_sections` points. Ribs pair the two sides inward from the seam;
/// each grid row is a segment of length `extent` centered on its rib,
/// oriented along the averaged rib direction.
pub fn build_cross_sections(ring: &[Point3], settings: &CrossSectionSettings) -> Result<CrossSections> {
    settings.validate()?;

    let cleaned = dedup_consecutive(ring, true, Tolerance::DEFAULT);
    let (aligned, seam) = align_to_seam(&cleaned)?;
    let ring = resample_closed(&aligned, 2 * settings.cross_sections)?;
    log::debug!(
        "ring of {} points (length {:.3}) resampled to {} from seam {}",
        cleaned.len(),
        closed_length(&cleaned),
        ring.len(),
        seam.index
    );

    let ribs = build_ribs(&ring, settings.rib_resolution)?;
    let frames = rib_frames(&ribs)?;
    let sweep_direction = average_direction(&frames, settings.end_exclusion)?;

    let all_rib_points: Vec<Point3> = ribs.iter().flatten().copied().collect();
    let spread = PrincipalAxes::from_points(&all_rib_points)
        .ok_or_else(|| SectionError::Degenerate("rib points have no principal axes".into()))?;
    let extent = settings.extent_scale * spread.major_variance().sqrt();
    if Tolerance::DEFAULT.is_zero(extent) {
        return Err(SectionError::Degenerate("ribs have zero extent".into()));
    }

    let samples = settings.samples_per_section;
    let rows = frames
        .iter()
        .map(|frame| {
            (0..samples)
                .map(|k| {
                    let s = k as f64 / (samples - 1) as f64 - 0.5;
                    frame.center + sweep_direction * (s * extent)
                })
                .collect()
        })
        .collect();
    let grid = StructuredGrid::from_rows(rows)?;
    log::debug!(
        "built {}x{} cross-section grid, extent {:.3}",
        grid.size_u(),
        grid.size_v(),
        extent
    );

    Ok(CrossSections {
        grid,
        ring,
        seam,
        frames,
        sweep_direction,
        extent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use resect_math::distance;
    use std::f64::consts::TAU;

    fn circle(n: usize, radius: f64, z: f64) -> Vec<Point3> {
        (0..n)
            .map(|i| {
                let t = TAU * i as f64 / n as f64;
                Point3::new(radius * t.cos(), radius * t.sin(), z)
            })
            .collect()
    }

    #[test]
    fn test_default_grid_shape() {
        let ring = circle(99, 5.0, 2.0);
        let sections = build_cross_sections(&ring, &CrossSectionSettings::default()).unwrap();
        assert_eq!(sections.grid.size_u(), 50);
        assert_eq!(sections.grid.size_v(), 50);
        assert_eq!(sections.ring.len(), 100);
        assert_eq!(sections.frames.len(), 50);
        assert!(sections.grid.points().iter().all(|p| (p.z - 2.0).abs() < 1e-9));
    }

    #[test]
    fn test_rows_are_parallel_segments() {
        let ring = circle(80, 3.0, 0.0);
        let sections = build_cross_sections(&ring, &CrossSectionSettings::default()).unwrap();
        let grid = &sections.grid;
        for i in [0, 25, 49] {
            let row = grid.row(i);
            assert_relative_eq!(
                distance(&row[0], &row[row.len() - 1]),
                sections.extent,
                epsilon = 1e-9
            );
            let dir = (row[row.len() - 1] - row[0]).normalize();
            assert_relative_eq!(dir.dot(&sections.sweep_direction), 1.0, epsilon = 1e-9);
        }
        // Sweep runs across the chords, perpendicular to the ring's normal.
        assert!(sections.sweep_direction.z.abs() < 1e-9);
    }

    #[test]
    fn test_repeated_closing_point_is_ignored() {
        let mut ring = circle(64, 4.0, 1.0);
        ring.push(ring[0]);
        ring.insert(10, ring[10]);
        let sections = build_cross_sections(&ring, &CrossSectionSettings::default()).unwrap();
        assert_eq!(sections.ring.len(), 100);
        assert!(sections.grid.points().iter().all(|p| p.coords.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn test_custom_counts() {
        let settings = CrossSectionSettings {
            cross_sections: 12,
            samples_per_section: 7,
            end_exclusion: 2,
            ..CrossSectionSettings::default()
        };
        let sections = build_cross_sections(&circle(40, 1.0, 0.0), &settings).unwrap();
        assert_eq!(sections.grid.size_u(), 12);
        assert_eq!(sections.grid.size_v(), 7);
    }

    #[test]
    fn test_collapsed_ring_fails() {
        let ring = vec![Point3::new(1.0, 1.0, 1.0); 10];
        assert!(matches!(
            build_cross_sections(&ring, &CrossSectionSettings::default()),
            Err(SectionError::TooFewPoints { found: 1, .. })
        ));
    }

    #[test]
    fn test_settings_validation() {
        let bad = CrossSectionSettings {
            cross_sections: 1,
            ..CrossSectionSettings::default()
        };
        assert!(bad.validate().is_err());
        let bad = CrossSectionSettings {
            extent_scale: 0.0,
            ..CrossSectionSettings::default()
        };
        assert!(bad.validate().is_err());
        assert!(CrossSectionSettings::default().validate().is_ok());
    }
}
