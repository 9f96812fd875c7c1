//! The two reconstruction pipelines and their shared surface stage.
//!
//! Both inputs are first adapted into one closed ring of points:
//!
//! - a distance band is extracted from the mesh, ordered, truncated at its
//!   outlier jump and smoothed through an elliptic Fourier round trip
//! - a drawn closed curve is cleaned and resampled directly
//!
//! The ring then goes through the cross-section builder, the grid
//! parametrizer and the Bézier fitter.

use crate::config::PlannerSettings;
use crate::error::{ResectionError, Result};
use crate::label::parse_distance_label;
use crate::sink::ControlPointSink;
use resect_bezier::{fit_surface, BezierControlGrid};
use resect_contour::{
    closed_length, dedup_consecutive, order_and_truncate, resample_closed, BandQuery,
    SurfaceMesh, Truncation,
};
use resect_efd::{dc_offset, fit_adaptive, inverse_transform};
use resect_math::{Point3, Tolerance, Vec3};
use resect_section::build_cross_sections;

/// Which adapter produced the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Distance band on a surface mesh.
    Band,
    /// User-drawn closed curve.
    Curve,
}

/// Input to one reconstruction.
#[derive(Debug, Clone, Copy)]
pub enum SurfaceInput<'a> {
    /// Points of `mesh` at distance `radius` from `seed`.
    Band {
        /// Organ surface.
        mesh: &'a SurfaceMesh,
        /// Reference point the distance is measured from.
        seed: Point3,
        /// Measured distance.
        radius: f64,
    },
    /// A closed curve, in drawing order.
    Curve {
        /// Curve points.
        points: &'a [Point3],
    },
}

impl SurfaceInput<'_> {
    /// The adapter this input goes through.
    pub fn kind(&self) -> InputKind {
        match self {
            SurfaceInput::Band { .. } => InputKind::Band,
            SurfaceInput::Curve { .. } => InputKind::Curve,
        }
    }
}

/// A finished reconstruction and what it was built from.
#[derive(Debug, Clone)]
pub struct SurfaceReport {
    /// Input adapter used.
    pub kind: InputKind,
    /// Fitted control points.
    pub control_points: BezierControlGrid,
    /// Mesh points in the distance band (band input only).
    pub band_size: Option<usize>,
    /// Jump truncation applied while ordering the band, if any.
    pub truncation: Option<Truncation>,
    /// Contour points fed to the Fourier fit (band input only).
    pub retained_points: Option<usize>,
    /// Harmonic order selected by energy (band input only).
    pub harmonic: Option<usize>,
    /// Perimeter of the seam-aligned ring the cross-sections were cut from.
    pub ring_length: f64,
    /// Averaged rib direction.
    pub sweep_direction: Vec3,
    /// Rows and columns of the cross-section grid.
    pub grid_size: (usize, usize),
}

/// Closed ring produced by an input adapter, with adapter diagnostics.
#[derive(Debug, Clone)]
struct Ring {
    points: Vec<Point3>,
    band_size: Option<usize>,
    truncation: Option<Truncation>,
    retained_points: Option<usize>,
    harmonic: Option<usize>,
}

/// Runs reconstructions with one validated set of [`PlannerSettings`].
#[derive(Debug, Clone)]
pub struct ResectionPlanner {
    settings: PlannerSettings,
}

impl ResectionPlanner {
    /// Create a planner, rejecting invalid settings.
    pub fn new(settings: PlannerSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The planner's settings.
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Reconstruct a surface without publishing it.
    pub fn reconstruct(&self, input: SurfaceInput<'_>) -> Result<SurfaceReport> {
        let kind = input.kind();
        let ring = match input {
            SurfaceInput::Band { mesh, seed, radius } => self.band_ring(mesh, seed, radius),
            SurfaceInput::Curve { points } => self.curve_ring(points),
        }
        .inspect_err(|e| log::warn!("{kind:?} input rejected: {e}"))?;

        let report = self
            .fit_ring(kind, ring)
            .inspect_err(|e| log::warn!("surface fit failed: {e}"))?;
        log::info!(
            "{:?} surface: {} control points from a {}x{} grid",
            kind,
            report.control_points.len(),
            report.grid_size.0,
            report.grid_size.1
        );
        Ok(report)
    }

    /// Reconstruct and, on success only, hand the control points to `sink`.
    ///
    /// A failed run leaves the sink untouched.
    pub fn update_surface<S: ControlPointSink + ?Sized>(
        &self,
        input: SurfaceInput<'_>,
        sink: &mut S,
    ) -> Result<SurfaceReport> {
        let report = self.reconstruct(input)?;
        sink.replace_control_points(report.control_points.points());
        Ok(report)
    }

    fn band_ring(&self, mesh: &SurfaceMesh, seed: Point3, radius: f64) -> Result<Ring> {
        let s = &self.settings;
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(ResectionError::InvalidMeasurement(radius.to_string()));
        }

        let band = BandQuery::new(seed, radius, s.band_thickness).extract(mesh);
        if band.is_empty() {
            return Err(ResectionError::EmptyInput(format!(
                "no mesh point within {} of distance {} from the seed",
                s.band_thickness, radius
            )));
        }

        let (path, truncation) =
            order_and_truncate(&band, s.jump_threshold, s.min_retained_fraction)?;
        let contour = dedup_consecutive(&path.points, false, Tolerance::DEFAULT);
        if contour.len() < s.min_points {
            return Err(ResectionError::EmptyInput(format!(
                "{} contour points after ordering, need {}",
                contour.len(),
                s.min_points
            )));
        }

        let (coeffs, harmonic) = fit_adaptive(&contour, s.energy_threshold)?;
        let locus = dc_offset(&contour)?;
        let points = inverse_transform(&coeffs, locus, s.reconstruction_samples, harmonic)?;
        log::debug!(
            "band of {} points ordered to {}, reconstructed with {} harmonics",
            band.len(),
            contour.len(),
            harmonic
        );

        Ok(Ring {
            points,
            band_size: Some(band.len()),
            truncation,
            retained_points: Some(contour.len()),
            harmonic: Some(harmonic),
        })
    }

    fn curve_ring(&self, curve: &[Point3]) -> Result<Ring> {
        let cleaned = dedup_consecutive(curve, true, Tolerance::DEFAULT);
        if cleaned.len() < 3 {
            return Err(ResectionError::EmptyInput(format!(
                "closed curve has {} distinct points, need 3",
                cleaned.len()
            )));
        }
        let points = resample_closed(&cleaned, self.settings.reconstruction_samples)?;
        Ok(Ring {
            points,
            band_size: None,
            truncation: None,
            retained_points: None,
            harmonic: None,
        })
    }

    fn fit_ring(&self, kind: InputKind, ring: Ring) -> Result<SurfaceReport> {
        let s = &self.settings;
        let sections = build_cross_sections(&ring.points, &s.section_settings())?;
        let control_points = fit_surface(&sections.grid, s.degree_u, s.degree_v, s.parametrization)?;

        Ok(SurfaceReport {
            kind,
            control_points,
            band_size: ring.band_size,
            truncation: ring.truncation,
            retained_points: ring.retained_points,
            harmonic: ring.harmonic,
            ring_length: closed_length(&sections.ring),
            sweep_direction: sections.sweep_direction,
            grid_size: (sections.grid.size_u(), sections.grid.size_v()),
        })
    }
}

/// Band pipeline with the radius read from a measurement label.
pub fn surface_from_band_label(
    planner: &ResectionPlanner,
    mesh: &SurfaceMesh,
    seed: Point3,
    label: &str,
) -> Result<SurfaceReport> {
    let radius = parse_distance_label(label)?;
    planner.reconstruct(SurfaceInput::Band { mesh, seed, radius })
}
