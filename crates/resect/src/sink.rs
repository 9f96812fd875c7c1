//! Destination for finished control points.

use resect_math::Point3;

/// Receives the control points of each successful reconstruction.
///
/// Implementations replace whatever they held; points are never appended.
pub trait ControlPointSink {
    /// Replace every control point with `points` (row-major).
    fn replace_control_points(&mut self, points: &[Point3]);
}

/// In-memory sink that keeps the latest control points.
#[derive(Debug, Clone, Default)]
pub struct ControlPointBuffer {
    points: Vec<Point3>,
    revision: u64,
}

impl ControlPointBuffer {
    /// Empty buffer at revision 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest control points.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of replacements so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl ControlPointSink for ControlPointBuffer {
    fn replace_control_points(&mut self, points: &[Point3]) {
        self.points.clear();
        self.points.extend_from_slice(points);
        self.revision += 1;
    }
}

impl<S: ControlPointSink + ?Sized> ControlPointSink for &mut S {
    fn replace_control_points(&mut self, points: &[Point3]) {
        (**self).replace_control_points(points);
    }
}
