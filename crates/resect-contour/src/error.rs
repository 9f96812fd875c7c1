//! Error types for contour extraction and ordering.

use thiserror::Error;

/// Errors that can occur while turning mesh points into an ordered contour.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// No mesh point satisfied the band criterion.
    #[error("no mesh point lies within {thickness} of distance {radius} from the reference point")]
    EmptyBand {
        /// Target radial distance.
        radius: f64,
        /// Band half-width.
        thickness: f64,
    },

    /// Too few points to continue.
    #[error("need at least {required} points, found {found}")]
    TooFewPoints {
        /// Number of points available.
        found: usize,
        /// Minimum number of points required.
        required: usize,
    },

    /// Jump truncation discarded most of the ordered path.
    #[error("path ordering kept only {kept} of {total} points after truncating at a {jump:.3} jump")]
    UnstableOrdering {
        /// Points kept after truncation.
        kept: usize,
        /// Points before truncation.
        total: usize,
        /// Length of the jump the path was cut at.
        jump: f64,
    },

    /// The curve has zero length or otherwise cannot be resampled.
    #[error("degenerate curve: {0}")]
    DegenerateCurve(String),

    /// A parameter was out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
