pub mod discrepancy;
pub mod error;
pub mod types;
