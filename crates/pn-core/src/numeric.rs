use crate::PnError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PnError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PnError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PnError::OutOfRange {
            what,
            value: v,
            expected: "> 0",
        })
    }
}

/// Finite and inside the closed interval `[lo, hi]`.
pub fn ensure_in_range(
    v: Real,
    lo: Real,
    hi: Real,
    what: &'static str,
    expected: &'static str,
) -> Result<Real, PnError> {
    let v = ensure_finite(v, what)?;
    if (lo..=hi).contains(&v) {
        Ok(v)
    } else {
        Err(PnError::OutOfRange { what, value: v, expected })
    }
}
