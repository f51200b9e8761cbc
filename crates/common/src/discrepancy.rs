use super::error::Error;
use super::types::Scalar;

/// Default agreement bound between a routine and the reference sum.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Symmetric normalized relative error: `|x - y| * 2 / (|x| + |y|)`.
///
/// The result lies in `[0, 2]`: `0` for identical values, `2` when one value is
/// the negation of the other. When both inputs are exactly zero the denominator
/// vanishes and the result is NaN. Use [`checked_rel_err`] to get an error instead.
pub fn rel_err<S: Scalar>(x: S, y: S) -> f64 {
    (x - y).magnitude() * 2.0 / (x.magnitude() + y.magnitude())
}

/// Like [`rel_err`], but rejects the degenerate and non-finite cases.
pub fn checked_rel_err<S: Scalar>(x: S, y: S) -> Result<f64, Error> {
    if x.magnitude() == 0.0 && y.magnitude() == 0.0 {
        return Err(Error::DegenerateComparison);
    }

    let err = rel_err(x, y);
    if !err.is_finite() {
        return Err(Error::NonFinite(err));
    }

    Ok(err)
}

/// Returns the discrepancy of `candidate` against `reference` if it is strictly
/// below `tolerance`.
///
/// Different summation orders round differently, so exact equality is never
/// expected; the tolerance bounds how far apart two correct routines may land.
pub fn check_agreement<S: Scalar>(reference: S, candidate: S, tolerance: f64) -> Result<f64, Error> {
    let discrepancy = checked_rel_err(reference, candidate)?;
    if discrepancy < tolerance {
        Ok(discrepancy)
    } else {
        Err(Error::ToleranceExceeded {
            discrepancy,
            tolerance,
        })
    }
}
