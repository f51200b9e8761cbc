use std::convert::Infallible;
use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::debug;

use super::alloc::{self, AllocationCount};
use common::error::Error;

/// Which per-evaluation duration a record reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Estimator {
    /// Fastest sample. Least affected by scheduling noise.
    #[default]
    Min,
    Median,
}

/// Repetition and warm-up policy for one measurement.
#[derive(Debug, Clone)]
pub struct BenchPolicy {
    /// Untimed evaluations run before calibration.
    pub warmup_runs: u32,
    /// Timed samples; each sample times one batch.
    pub samples: u32,
    /// Target wall-clock time for one batch.
    pub min_sample_time: Duration,
    /// Upper bound on evaluations per batch.
    pub max_batch: u64,
    pub estimator: Estimator,
}

impl Default for BenchPolicy {
    fn default() -> Self {
        Self {
            warmup_runs: 3,
            samples: 10,
            min_sample_time: Duration::from_millis(1),
            max_batch: 1 << 20,
            estimator: Estimator::Min,
        }
    }
}

impl BenchPolicy {
    pub fn validate(&self) -> Result<(), Error> {
        if self.samples == 0 {
            return Err(Error::InvalidPolicy("samples must be > 0".into()));
        }
        if self.max_batch == 0 {
            return Err(Error::InvalidPolicy("max_batch must be > 0".into()));
        }
        Ok(())
    }
}

/// Outcome of measuring one computation.
#[derive(Debug, Clone)]
pub struct BenchRecord {
    pub label: String,
    /// Per-evaluation duration of each sample, in measurement order.
    pub samples: Vec<Duration>,
    /// Evaluations per sample, as calibrated during warm-up.
    pub batch_size: u64,
    pub min: Duration,
    pub median: Duration,
    pub estimator: Estimator,
    /// Allocations made by a single evaluation, if the counting allocator is installed.
    pub allocations: Option<AllocationCount>,
}

impl BenchRecord {
    /// The duration selected by the policy's estimator.
    pub fn reported(&self) -> Duration {
        match self.estimator {
            Estimator::Min => self.min,
            Estimator::Median => self.median,
        }
    }

    /// Total number of timed evaluations.
    pub fn evaluations(&self) -> u64 {
        self.samples.len() as u64 * self.batch_size
    }
}

/// Sequential timing harness.
///
/// Runs everything on the calling thread. A computation is evaluated
/// `warmup_runs` times untimed, then in doubling batches until one batch
/// takes at least `min_sample_time` (or reaches `max_batch`), then
/// `samples` times at that batch size. One more evaluation between two
/// allocation snapshots yields the allocation count.
pub struct Bencher {
    policy: BenchPolicy,
}

impl Bencher {
    /// # Errors
    /// Returns `Error::InvalidPolicy` if the policy cannot produce a sample.
    pub fn new(policy: BenchPolicy) -> Result<Self, Error> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &BenchPolicy {
        &self.policy
    }

    /// Measures an infallible computation.
    pub fn run<T, F>(&self, label: &str, mut f: F) -> BenchRecord
    where
        F: FnMut() -> T,
    {
        match self.try_run(label, || Ok::<T, Infallible>(f())) {
            Ok(record) => record,
            Err(never) => match never {},
        }
    }

    /// Measures a fallible computation.
    ///
    /// The first error returned by `f` aborts the measurement and is handed
    /// back unchanged; nothing is retried.
    pub fn try_run<T, E, F>(&self, label: &str, mut f: F) -> Result<BenchRecord, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        for _ in 0..self.policy.warmup_runs {
            black_box(f()?);
        }

        let batch_size = self.calibrate(label, &mut f)?;

        let mut samples = Vec::with_capacity(self.policy.samples as usize);
        for _ in 0..self.policy.samples {
            let elapsed = time_batch(&mut f, batch_size)?;
            samples.push(per_evaluation(elapsed, batch_size));
        }

        let before = alloc::snapshot();
        let output = f()?;
        let after = alloc::snapshot();
        black_box(output);

        let allocations = match (before, after) {
            (Some(before), Some(after)) => Some(after.since(before)),
            _ => None,
        };

        let (min, median) = min_and_median(&samples);

        debug!(
            label,
            batch_size,
            min_ns = min.as_nanos() as u64,
            median_ns = median.as_nanos() as u64,
            "measurement complete"
        );

        Ok(BenchRecord {
            label: label.to_string(),
            samples,
            batch_size,
            min,
            median,
            estimator: self.policy.estimator,
            allocations,
        })
    }

    /// Doubles the batch size until one batch reaches `min_sample_time`.
    fn calibrate<T, E, F>(&self, label: &str, f: &mut F) -> Result<u64, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let mut batch_size = 1u64;
        loop {
            let elapsed = time_batch(f, batch_size)?;
            if elapsed >= self.policy.min_sample_time || batch_size >= self.policy.max_batch {
                debug!(label, batch_size, elapsed_ns = elapsed.as_nanos() as u64, "calibrated");
                return Ok(batch_size);
            }
            batch_size = batch_size.saturating_mul(2).min(self.policy.max_batch);
        }
    }
}

fn time_batch<T, E, F>(f: &mut F, batch_size: u64) -> Result<Duration, E>
where
    F: FnMut() -> Result<T, E>,
{
    let start = Instant::now();
    for _ in 0..batch_size {
        black_box(f()?);
    }
    Ok(start.elapsed())
}

fn per_evaluation(elapsed: Duration, batch_size: u64) -> Duration {
    Duration::from_secs_f64(elapsed.as_secs_f64() / batch_size as f64)
}

/// `samples` must be non-empty. Even-length medians average the two middle values.
fn min_and_median(samples: &[Duration]) -> (Duration, Duration) {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2
    } else {
        sorted[mid]
    };

    (sorted[0], median)
}
