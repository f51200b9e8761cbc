use perf_bench::*;
use summation_core::{DynamicList, reference_sum};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn main() {
    init_tracing();

    let samples = generate_benchmark_samples(SAMPLE_LEN);
    let reference = reference_sum(&samples);

    // One heap box per element, built once outside the timed region.
    let boxed = DynamicList::from_slice(&samples);
    drop(samples);

    let policy = BenchPolicy {
        warmup_runs: 1,
        samples: 5,
        ..BenchPolicy::default()
    };
    let bencher = match Bencher::new(policy) {
        Ok(bencher) => bencher,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let result = bencher.try_run("dynamic_list", || boxed.sum());
    let record = match result {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Dynamic sum failed: {}", e);
            std::process::exit(1);
        }
    };

    let checksum = boxed.sum().and_then(|v| v.as_f64()).unwrap_or(f64::NAN);
    let allocations = record.allocations.unwrap_or_default();

    println!("--- Boxed Benchmark Results ({} Samples) ---", SAMPLE_LEN);
    println!("Reference: {:.10}", reference);
    println!("Checksum: {:.10}", checksum);
    println!("Elapsed Time: {:?}", record.reported());
    println!(
        "Allocations: {} ({} bytes)",
        allocations.allocations, allocations.bytes
    );
}
