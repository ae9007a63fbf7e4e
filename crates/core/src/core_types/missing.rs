//! Missing-data sentinel and quality-control checks
//!
//! Upstream decoders flag absent observations with a reserved sentinel value
//! rather than NaN so that serialized profiles stay portable. Every threshold
//! comparison in this crate goes through [`qc`] so the sentinel can never
//! satisfy a physical threshold by accident.

/// Reserved sentinel marking a missing or invalid observation.
pub const MISSING: f32 = -9999.0;

/// Quality-control check: true when `value` is a usable physical quantity.
///
/// NaN and infinities fail the check alongside the sentinel, so arithmetic
/// that blows up on degraded input degrades back to "missing" at the next
/// comparison instead of propagating garbage.
#[inline]
pub fn qc(value: f32) -> bool {
    value.is_finite() && value > -9998.0
}

/// Negate a signed index, preserving the sentinel.
///
/// Used for Southern Hemisphere sign inversion of helicity-derived indices;
/// negating the sentinel must not manufacture a huge positive value.
#[inline]
pub fn qc_neg(value: f32) -> f32 {
    if qc(value) {
        -value
    } else {
        MISSING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_fails_qc() {
        assert!(!qc(MISSING));
        assert!(!qc(f32::NAN));
        assert!(!qc(f32::NEG_INFINITY));
        assert!(!qc(f32::INFINITY));
    }

    #[test]
    fn test_physical_values_pass_qc() {
        assert!(qc(0.0));
        assert!(qc(-89.2)); // coldest surface temperature on record
        assert!(qc(1050.0)); // deep surface high pressure
    }

    #[test]
    fn test_negation_preserves_sentinel() {
        assert_eq!(qc_neg(MISSING), MISSING);
        assert_eq!(qc_neg(250.0), -250.0);
        assert!(!qc(qc_neg(f32::NAN)));
    }
}
