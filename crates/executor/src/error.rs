use thiserror::Error;

use common::error::Error as CommonError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    Check(#[from] CommonError),

    #[error("Routine '{routine}' failed: {source}")]
    RoutineFailed {
        routine: String,
        #[source]
        source: CommonError,
    },
}
