pub mod config;
pub mod csv_source;
pub mod error;
pub mod report;
pub mod runner;
pub mod sampler;
pub mod types;

use std::env;
use std::path::Path;
use tracing::{error, info};

use common::types::SampleArray;
use csv_source::CsvSource;
use error::Error;
use perf_bench::{Bencher, CountingAllocator, init_tracing};
use runner::Comparison;
use sampler::UniformSampler;
use types::{DataSource, SampleSource};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        error!("Comparison failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let source = parse_args();
    let config = config::load_config()?;

    let sample = load_sample(&source, &config)?;
    let bencher = Bencher::new(config.harness.to_policy())?;

    let outcomes = Comparison::new(&sample, bencher, config.check.tolerance)
        .with_dynamic(config.sample.include_dynamic)
        .run()?;

    println!("--- Summation Comparison ({} Samples) ---", sample.len());
    print!("{}", report::render_table(&outcomes));

    if let Some(path) = &config.report.csv_path {
        report::write_csv(Path::new(path), &outcomes)?;
        info!(path = %path, "Report written");
    }

    Ok(())
}

/// Parse command-line arguments to determine data source
fn parse_args() -> DataSource {
    let args: Vec<String> = env::args().collect();
    let source = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "sim".to_string());

    match source.as_str() {
        "sim" => DataSource::Sim,
        "csv" => match args.get(2) {
            Some(path) => DataSource::Csv(path.clone()),
            None => usage(&args[0]),
        },
        _ => usage(&args[0]),
    }
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <SIM|CSV> [path_to_csv]\n  - SIM: sum a generated uniform sample\n  - CSV: sum the `value` column of a CSV file",
        program
    );
    std::process::exit(1);
}

fn load_sample(source: &DataSource, config: &config::Config) -> Result<SampleArray, Error> {
    match source {
        DataSource::Sim => {
            info!("Generating uniform sample...");
            UniformSampler::new(config.sample.len, config.sample.seed).load()
        }
        DataSource::Csv(path) => {
            info!("Reading sample from CSV...");
            CsvSource::new(path.clone()).load()
        }
    }
}
