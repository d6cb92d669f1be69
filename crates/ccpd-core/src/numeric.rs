use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Relative change between successive iterates, measured against the
/// current value. Signed denominators are deliberate: a sign flip in the
/// iterate shows up as a large residual instead of being masked.
pub fn relative_change(next: Real, current: Real) -> Real {
    ((next - current) / current).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_finite_passes_values_through() {
        assert_eq!(ensure_finite(1.5, "test").unwrap(), 1.5);
    }

    #[test]
    fn relative_change_is_symmetric_in_sign() {
        assert!((relative_change(1.1, 1.0) - 0.1).abs() < 1e-12);
        assert!((relative_change(0.9, 1.0) - 0.1).abs() < 1e-12);
    }
}
