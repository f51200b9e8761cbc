use common::discrepancy::{DEFAULT_TOLERANCE, rel_err};
use proptest::prelude::*;
use proptest::strategy::Strategy;
use summation_core::{DynamicList, Summation, all_routines, reference_sum};

const SAMPLE_LEN_STRATEGY: std::ops::Range<usize> = 1usize..2_000;

/// Strictly positive samples, so the reference sum is never zero and no
/// cancellation inflates the relative error.
fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1e-3f64..1.0, SAMPLE_LEN_STRATEGY)
}

fn nonzero_scalar() -> impl Strategy<Value = f64> {
    prop_oneof![-1e100f64..-1e-100, 1e-100f64..1e100]
}

proptest! {
    /// Property: equal scalars have discrepancy exactly 0
    #[test]
    fn equal_scalars_have_zero_discrepancy(x in nonzero_scalar()) {
        prop_assert_eq!(rel_err(x, x), 0.0);
    }

    /// Property: a scalar and its negation have discrepancy exactly 2
    #[test]
    fn negated_scalars_have_discrepancy_two(x in nonzero_scalar()) {
        prop_assert_eq!(rel_err(x, -x), 2.0);
    }

    /// Property: discrepancy is symmetric and bounded by [0, 2]
    #[test]
    fn discrepancy_is_symmetric_and_bounded(x in nonzero_scalar(), y in nonzero_scalar()) {
        let d = rel_err(x, y);
        prop_assert_eq!(d, rel_err(y, x));
        prop_assert!((0.0..=2.0).contains(&d));
    }

    /// Property: every unboxed routine agrees with the reference sum
    #[test]
    fn routines_agree_with_reference(values in sample_strategy()) {
        let reference = reference_sum(&values);
        for routine in all_routines() {
            let err = rel_err(reference, routine.sum(&values));
            prop_assert!(err < DEFAULT_TOLERANCE, "{} off by {:e}", routine.name(), err);
        }
    }

    /// Property: the boxed interpreter-style sum agrees with the reference sum
    #[test]
    fn dynamic_sum_agrees_with_reference(values in sample_strategy()) {
        let reference = reference_sum(&values);
        let boxed = DynamicList::from_slice(&values).sum().and_then(|v| v.as_f64());
        prop_assert!(boxed.is_ok());
        let err = rel_err(reference, boxed.unwrap());
        prop_assert!(err < DEFAULT_TOLERANCE, "dynamic sum off by {:e}", err);
    }

    /// Property: the dynamic list keeps one boxed element per input
    #[test]
    fn dynamic_list_preserves_length(values in sample_strategy()) {
        prop_assert_eq!(DynamicList::from_slice(&values).len(), values.len());
    }
}
