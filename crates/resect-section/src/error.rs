//! Error types for cross-section construction.

use resect_bezier::FitError;
use resect_contour::ContourError;
use thiserror::Error;

/// Errors that can occur while slicing a ring into cross-sections.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SectionError {
    /// Too few distinct points on the ring.
    #[error("ring needs at least {required} distinct points, found {found}")]
    TooFewPoints {
        /// Distinct points available.
        found: usize,
        /// Minimum required.
        required: usize,
    },

    /// The ring or its ribs collapse to a point or cancel out.
    #[error("degenerate ring: {0}")]
    Degenerate(String),

    /// A builder setting is out of range.
    #[error("invalid cross-section setting: {0}")]
    InvalidSetting(String),

    /// Resampling the ring failed.
    #[error(transparent)]
    Contour(#[from] ContourError),

    /// The emitted grid was rejected.
    #[error(transparent)]
    Grid(#[from] FitError),
}

/// Result type for cross-section operations.
pub type Result<T> = std::result::Result<T, SectionError>;
