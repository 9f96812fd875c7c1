#![warn(missing_docs)]

//! Contour extraction for the resection surface engine.
//!
//! Turns a surface mesh and a distance measurement into an ordered contour:
//!
//! - [`extract_band`] selects the mesh points at a given distance from a
//!   reference point
//! - [`order_nearest_neighbor`] strings an unordered point set into a path,
//!   recording the jump between consecutive points
//! - [`OrderedPath::truncate_at_largest_jump`] drops the tail after an outlier
//!   jump
//! - [`resample_closed`] redistributes a closed curve by arc length

pub mod band;
pub mod error;
pub mod order;
pub mod resample;

pub use band::{extract_band, BandQuery, SurfaceMesh};
pub use error::{ContourError, Result};
pub use order::{order_and_truncate, order_nearest_neighbor, JumpThreshold, OrderedPath, Truncation};
pub use resample::{closed_length, dedup_consecutive, resample_closed, rotate_to_start};
