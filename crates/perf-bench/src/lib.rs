pub mod alloc;
pub mod harness;

pub use alloc::{AllocationCount, CountingAllocator};
pub use harness::{BenchPolicy, BenchRecord, Bencher, Estimator};

use tracing_subscriber::EnvFilter;

// ----------------------------
// Benchmark samples
// ----------------------------

pub const SAMPLE_LEN: usize = 10_000_000;

/// Fractional part of the golden ratio; the additive recurrence over it
/// fills `[0, 1)` evenly without a random number generator.
const GOLDEN_FRACTION: f64 = 0.618_033_988_749_894_9;

/// Generates `len` deterministic samples in `[0, 1)` with mean close to 0.5.
///
/// Values vary with the index so the compiler cannot fold the sum into a
/// constant during benchmarking.
pub fn generate_benchmark_samples(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (i as f64 * GOLDEN_FRACTION).fract())
        .collect()
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
