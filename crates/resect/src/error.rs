//! Error taxonomy for the reconstruction pipelines.

use resect_bezier::FitError;
use resect_contour::ContourError;
use resect_efd::EfdError;
use resect_section::SectionError;
use thiserror::Error;

/// Why a reconstruction was abandoned.
///
/// A failed run never touches the display sink, so the previous surface stays
/// in place.
#[derive(Error, Debug)]
pub enum ResectionError {
    /// Band extraction or resampling left no (or too few) points.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Repeated or collapsed points made a stage undefined.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A least-squares system could not be solved.
    #[error("singular fit: {0}")]
    SingularFit(String),

    /// Jump truncation discarded most of the ordered path.
    #[error("unstable ordering: kept {kept} of {total} points")]
    UnstableOrdering {
        /// Points kept.
        kept: usize,
        /// Points before truncation.
        total: usize,
    },

    /// A setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A distance label could not be read.
    #[error("invalid measurement label {0:?}")]
    InvalidMeasurement(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid TOML for the settings.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ResectionError>;

impl From<ContourError> for ResectionError {
    fn from(err: ContourError) -> Self {
        match err {
            ContourError::EmptyBand { .. } | ContourError::TooFewPoints { .. } => {
                Self::EmptyInput(err.to_string())
            }
            ContourError::UnstableOrdering { kept, total, .. } => {
                Self::UnstableOrdering { kept, total }
            }
            ContourError::DegenerateCurve(msg) => Self::DegenerateGeometry(msg),
            ContourError::InvalidParameter(msg) => Self::InvalidConfig(msg),
        }
    }
}

impl From<EfdError> for ResectionError {
    fn from(err: EfdError) -> Self {
        match err {
            EfdError::TooFewPoints { .. } => Self::EmptyInput(err.to_string()),
            EfdError::InvalidOrder { .. } => Self::InvalidConfig(err.to_string()),
            EfdError::ZeroLengthSegment { .. }
            | EfdError::ZeroPower
            | EfdError::SingularNormalization => Self::DegenerateGeometry(err.to_string()),
        }
    }
}

impl From<FitError> for ResectionError {
    fn from(err: FitError) -> Self {
        match err {
            FitError::SingularFit { .. } | FitError::NonFinite => Self::SingularFit(err.to_string()),
            FitError::InvalidDegree { .. } => Self::InvalidConfig(err.to_string()),
            FitError::InvalidGrid(_) | FitError::DegenerateParametrization { .. } => {
                Self::DegenerateGeometry(err.to_string())
            }
        }
    }
}

impl From<SectionError> for ResectionError {
    fn from(err: SectionError) -> Self {
        match err {
            SectionError::TooFewPoints { .. } => Self::EmptyInput(err.to_string()),
            SectionError::Degenerate(msg) => Self::DegenerateGeometry(msg),
            SectionError::InvalidSetting(msg) => Self::InvalidConfig(msg),
            SectionError::Contour(inner) => inner.into(),
            SectionError::Grid(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_mapping() {
        let empty: ResectionError = ContourError::EmptyBand {
            radius: 5.0,
            thickness: 0.05,
        }
        .into();
        assert!(matches!(empty, ResectionError::EmptyInput(_)));

        let unstable: ResectionError = ContourError::UnstableOrdering {
            kept: 3,
            total: 40,
            jump: 25.0,
        }
        .into();
        assert!(matches!(
            unstable,
            ResectionError::UnstableOrdering { kept: 3, total: 40 }
        ));

        let dup: ResectionError = EfdError::ZeroLengthSegment { index: 4 }.into();
        assert!(matches!(dup, ResectionError::DegenerateGeometry(_)));

        let singular: ResectionError = FitError::SingularFit { direction: "u" }.into();
        assert!(matches!(singular, ResectionError::SingularFit(_)));
    }

    #[test]
    fn test_section_errors_unwrap_nested() {
        let nested: ResectionError =
            SectionError::Grid(FitError::SingularFit { direction: "v" }).into();
        assert!(matches!(nested, ResectionError::SingularFit(_)));

        let nested: ResectionError =
            SectionError::Contour(ContourError::DegenerateCurve("flat".into())).into();
        assert!(matches!(nested, ResectionError::DegenerateGeometry(_)));
    }
}
