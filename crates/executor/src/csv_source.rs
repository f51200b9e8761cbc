use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use tracing::{error, info};

use super::error::Error;
use super::types::SampleSource;
use common::types::SampleArray;

// Helper struct for CSV parsing; other columns are ignored.
#[derive(Debug, Deserialize, Default)]
pub struct CsvRecord {
    pub value: f64,
}

/// Reads the `value` column of a CSV file with a header row.
pub struct CsvSource {
    path: String,
}

impl CsvSource {
    pub fn new(path: String) -> Self {
        CsvSource { path }
    }

    fn parse_csv_to_values(&self) -> Result<Vec<f64>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            error!("Failed to read file {}: {:?}", self.path, e);
            Error::IoError(e)
        })?;

        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut values = Vec::new();

        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            values.push(record.value);
        }
        Ok(values)
    }
}

impl SampleSource for CsvSource {
    fn load(self) -> Result<SampleArray, Error> {
        let values = self.parse_csv_to_values()?;
        info!(path = %self.path, len = values.len(), "Loaded sample from CSV");
        Ok(SampleArray::new(values)?)
    }
}
