#![warn(missing_docs)]

//! Contour-to-surface reconstruction for liver resection planning.
//!
//! Given a distance band on an organ surface mesh, or a closed curve drawn on
//! it, [`ResectionPlanner`] reconstructs a smooth cubic Bézier resection
//! surface and hands its control points to a [`ControlPointSink`].
//!
//! # Example
//!
//! ```ignore
//! use resect::{ControlPointBuffer, PlannerSettings, ResectionPlanner, SurfaceInput};
//!
//! let planner = ResectionPlanner::new(PlannerSettings::default())?;
//! let mut display = ControlPointBuffer::new();
//! let report = planner.update_surface(SurfaceInput::Curve { points: &curve }, &mut display)?;
//! println!("{} control points", report.control_points.len());
//! ```

pub mod config;
pub mod error;
pub mod label;
pub mod pipeline;
pub mod sink;

pub use config::PlannerSettings;
pub use error::{ResectionError, Result};
pub use label::parse_distance_label;
pub use pipeline::{
    surface_from_band_label, InputKind, ResectionPlanner, SurfaceInput, SurfaceReport,
};
pub use sink::{ControlPointBuffer, ControlPointSink};

pub use resect_bezier::{BezierControlGrid, BezierSurface, ParametrizationMethod};
pub use resect_contour::{JumpThreshold, SurfaceMesh};
pub use resect_math::Point3;
