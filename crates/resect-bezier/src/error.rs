//! Error types for surface parametrization and fitting.

use thiserror::Error;

/// Errors that can occur while fitting a Bézier surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Grid dimensions do not match its point count, or a dimension is empty.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Every line of the grid in one direction has zero length.
    #[error("cannot parametrize {direction} direction: all lines have zero length")]
    DegenerateParametrization {
        /// `"u"` or `"v"`.
        direction: &'static str,
    },

    /// A normal-equation matrix is not invertible.
    #[error("normal equations for the {direction} direction are singular")]
    SingularFit {
        /// `"u"` or `"v"`.
        direction: &'static str,
    },

    /// The solve produced non-finite control points.
    #[error("fit produced non-finite control points")]
    NonFinite,

    /// The degree cannot be fitted with the available samples.
    #[error("degree {degree} needs more than {samples} samples")]
    InvalidDegree {
        /// Requested polynomial degree.
        degree: usize,
        /// Samples available in that direction.
        samples: usize,
    },
}

/// Result type for fitting operations.
pub type Result<T> = std::result::Result<T, FitError>;
