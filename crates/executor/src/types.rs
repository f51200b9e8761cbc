use common::types::SampleArray;

use super::error::Error;

/// Where the sample array comes from, as chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Sim,
    Csv(String),
}

/// A trait defining the contract for any source that produces the sample
/// array consumed by every routine under comparison.
///
/// Decouples the comparison runner from the concrete origin of the data
/// (generated vs. read from a file). A source is consumed by `load`.
pub trait SampleSource {
    fn load(self) -> Result<SampleArray, Error>;
}
