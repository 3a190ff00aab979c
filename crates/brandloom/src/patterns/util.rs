//! Shared checks for strict parameter validation.

use crate::error::{BrandloomError, BrandloomResult};

/// Reject NaN and infinities.
pub fn finite(name: &str, value: f64) -> BrandloomResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BrandloomError::invalid_parameter(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

/// Reject negative (or non-finite) sizes.
pub fn non_negative(name: &str, value: f64) -> BrandloomResult<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(BrandloomError::invalid_parameter(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Require `lo <= value <= hi`.
pub fn in_range(name: &str, value: f64, lo: f64, hi: f64) -> BrandloomResult<()> {
    finite(name, value)?;
    if value < lo || value > hi {
        return Err(BrandloomError::invalid_parameter(format!(
            "{name} must be within [{lo}, {hi}], got {value}"
        )));
    }
    Ok(())
}

/// Require a normalized coordinate or opacity in [0, 1].
pub fn unit_interval(name: &str, value: f64) -> BrandloomResult<()> {
    in_range(name, value, 0.0, 1.0)
}
