use std::time::Duration;

use perf_bench::alloc;
use perf_bench::{BenchPolicy, Bencher, CountingAllocator, Estimator};
use summation_core::{DynamicList, Summation, routines::LaneSum};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn quick_bencher() -> Bencher {
    Bencher::new(BenchPolicy {
        warmup_runs: 1,
        samples: 3,
        min_sample_time: Duration::from_micros(50),
        max_batch: 1 << 12,
        estimator: Estimator::Median,
    })
    .expect("valid policy")
}

// Counters are process-wide and the test harness may allocate on other
// threads, so only lower bounds are asserted.

#[test]
fn counts_allocations_of_boxed_sum() {
    let values: Vec<f64> = (1..=1000).map(|i| i as f64 / 1000.0).collect();
    let boxed = DynamicList::from_slice(&values);

    let record = quick_bencher().run("dynamic_list", || boxed.sum());

    let counted = record.allocations.expect("counting allocator is installed");
    // One fresh box per partial sum plus the initial accumulator.
    assert!(counted.allocations >= 1001, "got {:?}", counted);
    assert!(counted.bytes >= 1001 * std::mem::size_of::<summation_core::Value>() as u64);
    assert!(record.reported() > Duration::ZERO);
}

#[test]
fn counts_explicit_vector_allocation() {
    let record = quick_bencher().run("vec", || vec![0u8; 4096]);

    let counted = record.allocations.expect("counting allocator is installed");
    assert!(counted.allocations >= 1);
    assert!(counted.bytes >= 4096);
}

#[test]
fn unboxed_sum_reports_allocation_data() {
    let values: Vec<f64> = (0..10_000).map(|i| (i % 10) as f64).collect();

    let record = quick_bencher().run("lane_sum_x8", || LaneSum::<8>.sum(&values));

    assert!(alloc::is_installed());
    assert!(record.allocations.is_some());
    assert!(record.reported() > Duration::ZERO);
}
