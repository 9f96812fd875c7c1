//! Planner configuration.

use crate::error::{ResectionError, Result};
use resect_bezier::ParametrizationMethod;
use resect_contour::JumpThreshold;
use resect_efd::DEFAULT_ENERGY_THRESHOLD;
use resect_section::CrossSectionSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every tunable of the reconstruction pipelines.
///
/// Missing keys in a TOML file fall back to [`PlannerSettings::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Half-width of the distance band around the measured radius.
    pub band_thickness: f64,
    /// When an ordering jump counts as an outlier.
    pub jump_threshold: JumpThreshold,
    /// Smallest fraction of the band that truncation may keep.
    pub min_retained_fraction: f64,
    /// Fewest contour points the Fourier fit accepts.
    pub min_points: usize,
    /// Energy fraction the selected harmonics must capture.
    pub energy_threshold: f64,
    /// Points sampled from the reconstructed Fourier curve.
    pub reconstruction_samples: usize,
    /// Number of cross-sections (grid rows).
    pub cross_sections: usize,
    /// Segments per rib.
    pub rib_resolution: usize,
    /// Samples along each cross-section (grid columns).
    pub samples_per_section: usize,
    /// Ribs ignored at each end when averaging the sweep direction.
    pub end_exclusion: usize,
    /// Bézier degree across cross-sections.
    pub degree_u: usize,
    /// Bézier degree along each cross-section.
    pub degree_v: usize,
    /// Parametrization of grid rows and columns.
    pub parametrization: ParametrizationMethod,
    /// Cross-section length in standard deviations of the rib points.
    pub extent_scale: f64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            band_thickness: 0.05,
            jump_threshold: JumpThreshold::default(),
            min_retained_fraction: 0.5,
            min_points: 8,
            energy_threshold: DEFAULT_ENERGY_THRESHOLD,
            reconstruction_samples: 100,
            cross_sections: 50,
            rib_resolution: 20,
            samples_per_section: 50,
            end_exclusion: 4,
            degree_u: 3,
            degree_v: 3,
            parametrization: ParametrizationMethod::ChordLength,
            extent_scale: 4.0,
        }
    }
}

impl PlannerSettings {
    /// Parse settings from TOML and validate them.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ResectionError::InvalidConfig(e.to_string()))
    }

    /// The cross-section builder's share of the settings.
    pub fn section_settings(&self) -> CrossSectionSettings {
        CrossSectionSettings {
            cross_sections: self.cross_sections,
            rib_resolution: self.rib_resolution,
            samples_per_section: self.samples_per_section,
            end_exclusion: self.end_exclusion,
            extent_scale: self.extent_scale,
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.band_thickness > 0.0) {
            return Err(ResectionError::InvalidConfig(
                "band_thickness must be positive".into(),
            ));
        }
        if !(self.jump_threshold.value() > 0.0) {
            return Err(ResectionError::InvalidConfig(
                "jump_threshold must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_retained_fraction) {
            return Err(ResectionError::InvalidConfig(
                "min_retained_fraction must be between 0 and 1".into(),
            ));
        }
        if !(self.energy_threshold > 0.0 && self.energy_threshold <= 1.0) {
            return Err(ResectionError::InvalidConfig(
                "energy_threshold must be in (0, 1]".into(),
            ));
        }
        if self.min_points < 2 {
            return Err(ResectionError::InvalidConfig(
                "min_points must be at least 2".into(),
            ));
        }
        if self.reconstruction_samples < 3 {
            return Err(ResectionError::InvalidConfig(
                "reconstruction_samples must be at least 3".into(),
            ));
        }
        if self.degree_u == 0 || self.degree_v == 0 {
            return Err(ResectionError::InvalidConfig(
                "Bézier degrees must be positive".into(),
            ));
        }
        if self.degree_u >= self.cross_sections || self.degree_v >= self.samples_per_section {
            return Err(ResectionError::InvalidConfig(format!(
                "degree ({}, {}) needs a grid larger than {}x{}",
                self.degree_u, self.degree_v, self.cross_sections, self.samples_per_section
            )));
        }
        self.section_settings().validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let s = PlannerSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.cross_sections, 50);
        assert_eq!(s.degree_u, 3);
        assert_eq!(s.jump_threshold, JumpThreshold::Fixed(20.0));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let s = PlannerSettings::from_toml_str(
            r#"
            band_thickness = 0.1
            parametrization = "centripetal"

            [jump_threshold]
            kind = "median_spacing"
            value = 6.0
            "#,
        )
        .unwrap();
        assert_eq!(s.band_thickness, 0.1);
        assert_eq!(s.parametrization, ParametrizationMethod::Centripetal);
        assert_eq!(s.jump_threshold, JumpThreshold::MedianSpacing(6.0));
        assert_eq!(s.samples_per_section, 50);
    }

    #[test]
    fn test_toml_round_trip() {
        let s = PlannerSettings::default();
        let text = s.to_toml_string().unwrap();
        assert_eq!(PlannerSettings::from_toml_str(&text).unwrap(), s);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "band_thickness = 0.0",
            "energy_threshold = 1.5",
            "cross_sections = 1",
            "degree_u = 0",
            "degree_v = 50",
            "[jump_threshold]\nkind = \"fixed\"\nvalue = -1.0",
        ];
        for case in cases {
            assert!(
                matches!(
                    PlannerSettings::from_toml_str(case),
                    Err(ResectionError::InvalidConfig(_))
                ),
                "accepted {case}"
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            PlannerSettings::from_toml_str("band_thickness = \"wide\""),
            Err(ResectionError::ConfigParse(_))
        ));
    }
}
