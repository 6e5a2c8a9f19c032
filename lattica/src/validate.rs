//! Parameter range checks shared by the shape records
//!
//! Out-of-range values are rejected, never clamped.

use crate::error::{Error, Result};

/// Subdivision count must be at least `min`
pub(crate) fn check_divisions(field: &'static str, value: u16, min: u16) -> Result<()> {
    if value < min {
        return Err(Error::invalid(
            field,
            format!("must be at least {min}, got {value}"),
        ));
    }
    Ok(())
}

/// Dimension must be finite and strictly positive
pub(crate) fn check_dimension(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid(
            field,
            format!("must be finite and greater than 0, got {value}"),
        ));
    }
    Ok(())
}

/// `smaller` must be strictly less than `larger`
pub(crate) fn check_less(
    field: &'static str,
    smaller: f32,
    larger_field: &'static str,
    larger: f32,
) -> Result<()> {
    if smaller >= larger {
        return Err(Error::invalid(
            field,
            format!("must be less than {larger_field} ({larger}), got {smaller}"),
        ));
    }
    Ok(())
}

/// Winding frequency must be at least 1
pub(crate) fn check_frequency(field: &'static str, value: i32) -> Result<()> {
    if value < 1 {
        return Err(Error::invalid(
            field,
            format!("must be at least 1, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_rejects_non_finite() {
        assert!(check_dimension("radius", 0.5).is_ok());
        assert!(check_dimension("radius", 0.0).is_err());
        assert!(check_dimension("radius", -1.0).is_err());
        assert!(check_dimension("radius", f32::NAN).is_err());
        assert!(check_dimension("radius", f32::INFINITY).is_err());
    }

    #[test]
    fn test_divisions_and_ordering() {
        assert!(check_divisions("div_radial", 3, 3).is_ok());
        let err = check_divisions("div_radial", 2, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "div_radial", .. }));

        assert!(check_less("inner_radius", 0.25, "outer_radius", 0.5).is_ok());
        assert!(check_less("inner_radius", 0.5, "outer_radius", 0.5).is_err());

        assert!(check_frequency("p", 1).is_ok());
        assert!(check_frequency("q", 0).is_err());
        assert!(check_frequency("q", -3).is_err());
    }
}
