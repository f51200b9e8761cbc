use perf_bench::*;
use summation_core::{all_routines, reference_sum};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn main() {
    init_tracing();

    let samples = generate_benchmark_samples(SAMPLE_LEN);
    let bencher = match Bencher::new(BenchPolicy::default()) {
        Ok(bencher) => bencher,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let reference = reference_sum(&samples);

    println!("--- Unboxed Benchmark Results ({} Samples) ---", SAMPLE_LEN);
    println!("Reference: {:.10}", reference);

    // Every routine borrows the same contiguous slice.
    for routine in all_routines() {
        let record = bencher.run(routine.name(), || routine.sum(&samples));
        let allocations = record.allocations.unwrap_or_default();
        println!(
            "{:<16} {:>12?}  allocs: {}  bytes: {}",
            record.label,
            record.reported(),
            allocations.allocations,
            allocations.bytes
        );
    }
}
