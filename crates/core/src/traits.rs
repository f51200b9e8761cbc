/// Trait for routines that reduce a flat array of doubles to their sum.
///
/// Implementations differ only in evaluation order and in how much of the
/// loop the compiler can keep in registers or vectorise; all of them must
/// agree with [`crate::reference_sum`] up to rounding.
pub trait Summation {
    /// Short, stable identifier used in reports.
    fn name(&self) -> &'static str;

    /// Sums `values`. An empty slice sums to `0.0`.
    fn sum(&self, values: &[f64]) -> f64;
}
