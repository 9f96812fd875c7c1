//! Error types for elliptic Fourier fitting.

use thiserror::Error;

/// Errors that can occur while fitting or evaluating Fourier descriptors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EfdError {
    /// Not enough points to fit a single harmonic.
    #[error("need at least {required} points, found {found}")]
    TooFewPoints {
        /// Number of points supplied.
        found: usize,
        /// Minimum number required.
        required: usize,
    },

    /// Two consecutive points coincide, giving a zero-length segment.
    #[error("zero-length segment after point {index}")]
    ZeroLengthSegment {
        /// Index of the first point of the segment.
        index: usize,
    },

    /// Requested harmonic order is outside the representable range.
    #[error("harmonic order {order} outside 1..={max}")]
    InvalidOrder {
        /// Requested order.
        order: usize,
        /// Largest allowed order.
        max: usize,
    },

    /// All coefficients are zero, so no energy fraction can be computed.
    #[error("harmonic table carries no energy")]
    ZeroPower,

    /// The first harmonic does not span 3D, so the normalization is undefined.
    #[error("first harmonic is degenerate; cannot normalize")]
    SingularNormalization,
}

/// Result type for Fourier descriptor operations.
pub type Result<T> = std::result::Result<T, EfdError>;
