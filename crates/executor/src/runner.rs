use tracing::info;

use super::error::Error;
use common::discrepancy::check_agreement;
use common::types::SampleArray;
use perf_bench::{BenchRecord, Bencher};
use summation_core::{DynamicList, Summation, all_routines, reference_sum};

/// Label of the boxed, interpreter-style routine in reports.
pub const DYNAMIC_ROUTINE: &str = "dynamic_list";

/// Checked result and timing of one routine.
#[derive(Debug, Clone)]
pub struct RoutineOutcome {
    pub result: f64,
    pub discrepancy: f64,
    pub record: BenchRecord,
}

/// Runs every routine over one sample: check first, then time.
///
/// A routine is only timed after its result agrees with the reference sum
/// within `tolerance`; the first disagreement aborts the whole comparison.
pub struct Comparison<'a> {
    sample: &'a SampleArray,
    bencher: Bencher,
    tolerance: f64,
    include_dynamic: bool,
}

impl<'a> Comparison<'a> {
    pub fn new(sample: &'a SampleArray, bencher: Bencher, tolerance: f64) -> Self {
        Comparison {
            sample,
            bencher,
            tolerance,
            include_dynamic: true,
        }
    }

    /// Whether the boxed dynamic list is measured alongside the unboxed routines.
    pub fn with_dynamic(mut self, include_dynamic: bool) -> Self {
        self.include_dynamic = include_dynamic;
        self
    }

    pub fn run(&self) -> Result<Vec<RoutineOutcome>, Error> {
        let reference = reference_sum(self.sample);
        info!(
            len = self.sample.len(),
            reference, "Reference sum computed"
        );

        let mut outcomes = Vec::new();

        if self.include_dynamic {
            outcomes.push(self.run_dynamic(reference)?);
        }

        for routine in all_routines() {
            outcomes.push(self.run_routine(routine.as_ref(), reference)?);
        }

        Ok(outcomes)
    }

    fn run_routine(&self, routine: &dyn Summation, reference: f64) -> Result<RoutineOutcome, Error> {
        let name = routine.name();
        let sample = self.sample.as_slice();

        let result = routine.sum(sample);
        let discrepancy = self.check(name, reference, result)?;

        let record = self.bencher.run(name, || routine.sum(sample));
        info!(routine = name, elapsed = ?record.reported(), discrepancy, "Routine measured");

        Ok(RoutineOutcome {
            result,
            discrepancy,
            record,
        })
    }

    fn run_dynamic(&self, reference: f64) -> Result<RoutineOutcome, Error> {
        let failed = |source| Error::RoutineFailed {
            routine: DYNAMIC_ROUTINE.to_string(),
            source,
        };

        // Boxing happens once, outside the timed region.
        let list = DynamicList::from_slice(self.sample);

        let result = list.sum().and_then(|v| v.as_f64()).map_err(failed)?;
        let discrepancy = self.check(DYNAMIC_ROUTINE, reference, result)?;

        let record = self
            .bencher
            .try_run(DYNAMIC_ROUTINE, || list.sum())
            .map_err(failed)?;
        info!(routine = DYNAMIC_ROUTINE, elapsed = ?record.reported(), discrepancy, "Routine measured");

        Ok(RoutineOutcome {
            result,
            discrepancy,
            record,
        })
    }

    fn check(&self, name: &str, reference: f64, result: f64) -> Result<f64, Error> {
        check_agreement(reference, result, self.tolerance).map_err(|source| Error::RoutineFailed {
            routine: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::UniformSampler;
    use crate::types::SampleSource;
    use common::discrepancy::DEFAULT_TOLERANCE;
    use common::error::Error as CommonError;
    use perf_bench::{BenchPolicy, Estimator};
    use std::time::Duration;

    fn quick_bencher() -> Bencher {
        Bencher::new(BenchPolicy {
            warmup_runs: 0,
            samples: 2,
            min_sample_time: Duration::ZERO,
            max_batch: 1,
            estimator: Estimator::Min,
        })
        .unwrap()
    }

    #[test]
    fn test_comparison_covers_every_routine() {
        let sample = UniformSampler::new(50_000, Some(3)).load().unwrap();
        let outcomes = Comparison::new(&sample, quick_bencher(), DEFAULT_TOLERANCE)
            .run()
            .unwrap();

        assert_eq!(outcomes.len(), all_routines().len() + 1);
        assert_eq!(outcomes[0].record.label, DYNAMIC_ROUTINE);
        for outcome in &outcomes {
            assert!(outcome.discrepancy < DEFAULT_TOLERANCE);
            assert!(outcome.record.reported() > Duration::ZERO);
        }
    }

    #[test]
    fn test_dynamic_can_be_skipped() {
        let sample = UniformSampler::new(1_000, Some(3)).load().unwrap();
        let outcomes = Comparison::new(&sample, quick_bencher(), DEFAULT_TOLERANCE)
            .with_dynamic(false)
            .run()
            .unwrap();

        assert_eq!(outcomes.len(), all_routines().len());
        assert!(outcomes.iter().all(|o| o.record.label != DYNAMIC_ROUTINE));
    }

    /// With catastrophic cancellation the uncompensated routines drift far
    /// from the reference and the first one aborts the run.
    #[test]
    fn test_disagreement_aborts() {
        let sample = SampleArray::new(vec![1.0, 1e100, 1.0, -1e100]).unwrap();
        let result = Comparison::new(&sample, quick_bencher(), DEFAULT_TOLERANCE)
            .with_dynamic(false)
            .run();

        match result {
            Err(Error::RoutineFailed { routine, source }) => {
                assert_eq!(routine, "indexed_loop");
                assert!(matches!(source, CommonError::ToleranceExceeded { .. }));
            }
            other => panic!("Expected RoutineFailed, got: {:?}", other),
        }
    }

    /// 10,000,000 uniform values sum to about 5,000,000 and all routines agree.
    #[test]
    fn test_ten_million_uniform_samples() {
        let sample = UniformSampler::new(10_000_000, Some(2024)).load().unwrap();
        let reference = reference_sum(&sample);

        assert!(
            (reference - 5_000_000.0).abs() < 5_000.0,
            "reference sum {} is not within 0.1% of 5e6",
            reference
        );

        for routine in all_routines() {
            let discrepancy = check_agreement(reference, routine.sum(&sample), DEFAULT_TOLERANCE);
            assert!(discrepancy.is_ok(), "{}: {:?}", routine.name(), discrepancy);
        }
    }
}
