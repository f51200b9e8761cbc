use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use super::error::Error;
use super::runner::RoutineOutcome;

/// One CSV row per measured routine.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReportRow {
    pub routine: String,
    pub reported_ns: u64,
    pub min_ns: u64,
    pub median_ns: u64,
    pub evaluations: u64,
    pub allocations: Option<u64>,
    pub allocated_bytes: Option<u64>,
    pub result: f64,
    pub discrepancy: f64,
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

impl From<&RoutineOutcome> for ReportRow {
    fn from(outcome: &RoutineOutcome) -> Self {
        let record = &outcome.record;
        ReportRow {
            routine: record.label.clone(),
            reported_ns: nanos(record.reported()),
            min_ns: nanos(record.min),
            median_ns: nanos(record.median),
            evaluations: record.evaluations(),
            allocations: record.allocations.map(|a| a.allocations),
            allocated_bytes: record.allocations.map(|a| a.bytes),
            result: outcome.result,
            discrepancy: outcome.discrepancy,
        }
    }
}

/// Renders outcomes as an aligned text table, fastest routine marked `1.00x`.
pub fn render_table(outcomes: &[RoutineOutcome]) -> String {
    let fastest = outcomes
        .iter()
        .map(|o| o.record.reported())
        .min()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>14} {:>14} {:>14} {:>9} {:>12} {:>14} {:>10}",
        "routine", "time", "min", "median", "relative", "allocs", "bytes", "rel_err"
    );

    for outcome in outcomes {
        let record = &outcome.record;
        let relative = if fastest.is_zero() {
            f64::NAN
        } else {
            record.reported().as_secs_f64() / fastest.as_secs_f64()
        };
        let (allocs, bytes) = match record.allocations {
            Some(a) => (a.allocations.to_string(), a.bytes.to_string()),
            None => ("n/a".to_string(), "n/a".to_string()),
        };

        let _ = writeln!(
            out,
            "{:<16} {:>14} {:>14} {:>14} {:>8.2}x {:>12} {:>14} {:>10.2e}",
            record.label,
            format!("{:?}", record.reported()),
            format!("{:?}", record.min),
            format!("{:?}", record.median),
            relative,
            allocs,
            bytes,
            outcome.discrepancy
        );
    }

    out
}

/// Writes one row per outcome, with a header, to `path`.
pub fn write_csv(path: &Path, outcomes: &[RoutineOutcome]) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    for outcome in outcomes {
        wtr.serialize(ReportRow::from(outcome))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use perf_bench::{AllocationCount, BenchRecord, Estimator};
    use tempfile::NamedTempFile;

    fn outcome(label: &str, nanos: u64, allocations: Option<AllocationCount>) -> RoutineOutcome {
        let d = Duration::from_nanos(nanos);
        RoutineOutcome {
            result: 5_000_000.5,
            discrepancy: 1e-13,
            record: BenchRecord {
                label: label.to_string(),
                samples: vec![d, d * 2],
                batch_size: 4,
                min: d,
                median: d * 3 / 2,
                estimator: Estimator::Min,
                allocations,
            },
        }
    }

    fn sample_outcomes() -> Vec<RoutineOutcome> {
        vec![
            outcome(
                "dynamic_list",
                40_000,
                Some(AllocationCount {
                    allocations: 1001,
                    bytes: 24_024,
                }),
            ),
            outcome("lane_sum_x8", 1_000, None),
        ]
    }

    #[test]
    fn test_report_row_from_outcome() {
        let outcomes = sample_outcomes();
        let row = ReportRow::from(&outcomes[0]);
        assert_eq!(row.routine, "dynamic_list");
        assert_eq!(row.reported_ns, 40_000);
        assert_eq!(row.median_ns, 60_000);
        assert_eq!(row.evaluations, 8);
        assert_eq!(row.allocations, Some(1001));
        assert_eq!(row.allocated_bytes, Some(24_024));
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&sample_outcomes());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("routine"));
        assert!(lines[1].starts_with("dynamic_list"));
        assert!(lines[1].contains("40.00x"));
        assert!(lines[1].contains("1001"));
        assert!(lines[2].contains("1.00x"));
        assert!(lines[2].contains("n/a"));
    }

    #[test]
    fn test_write_csv() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write_csv(temp_file.path(), &sample_outcomes()).expect("write should succeed");

        let mut rdr = csv::Reader::from_path(temp_file.path()).expect("readable csv");
        let headers = rdr.headers().expect("headers").clone();
        assert_eq!(&headers[0], "routine");
        assert_eq!(headers.len(), 9);

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "dynamic_list");
        assert_eq!(&rows[1][5], "");
    }

    #[test]
    fn test_write_csv_to_missing_directory_fails() {
        let result = write_csv(Path::new("no/such/dir/report.csv"), &sample_outcomes());
        assert!(result.is_err());
    }
}
