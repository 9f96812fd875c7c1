//! Distance measurement labels such as `"12.3mm"`.

use crate::error::{ResectionError, Result};

/// Read the distance from a measurement label.
///
/// The value is the text before the first unit letter (`"12.3mm"` gives
/// `12.3`, `" 7 cm"` gives `7.0`). It must be finite and positive.
pub fn parse_distance_label(label: &str) -> Result<f64> {
    let invalid = || ResectionError::InvalidMeasurement(label.to_string());

    let trimmed = label.trim();
    let numeric = trimmed
        .find(|c: char| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
        .map_or(trimmed, |end| &trimmed[..end]);
    let value: f64 = numeric.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}
