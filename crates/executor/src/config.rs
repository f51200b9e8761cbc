use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::Error;
use perf_bench::{BenchPolicy, Estimator};

#[derive(Debug, Deserialize, Clone)]
pub struct SampleConfig {
    pub len: usize,
    pub seed: Option<u64>,
    #[serde(default = "default_include_dynamic")]
    pub include_dynamic: bool,
}

fn default_include_dynamic() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    Min,
    Median,
}

impl From<EstimatorKind> for Estimator {
    fn from(kind: EstimatorKind) -> Self {
        match kind {
            EstimatorKind::Min => Estimator::Min,
            EstimatorKind::Median => Estimator::Median,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HarnessConfig {
    pub warmup_runs: u32,
    pub samples: u32,
    pub min_sample_time_ms: u64,
    pub max_batch: u64,
    pub estimator: EstimatorKind,
}

impl HarnessConfig {
    pub fn to_policy(&self) -> BenchPolicy {
        BenchPolicy {
            warmup_runs: self.warmup_runs,
            samples: self.samples,
            min_sample_time: Duration::from_millis(self.min_sample_time_ms),
            max_batch: self.max_batch,
            estimator: self.estimator.into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckConfig {
    pub tolerance: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    pub csv_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub sample: SampleConfig,
    pub harness: HarnessConfig,
    pub check: CheckConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Loads configuration from `crates/executor/Config.toml` under the current
/// directory, overridden by `EXECUTOR_<SECTION>__<KEY>` environment variables.
pub fn load_config() -> Result<Config, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
    })?;

    let config_file_path: PathBuf = base_path
        .join("crates")
        .join("executor")
        .join("Config.toml");

    load_config_from(&config_file_path)
}

/// Loads configuration from an explicit file path plus environment overrides.
pub fn load_config_from(config_file_path: &Path) -> Result<Config, Error> {
    if !config_file_path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at calculated path: {}",
            config_file_path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(File::from(config_file_path).required(true))
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    let tolerance = app_config.check.tolerance;
    if tolerance.is_nan() || tolerance <= 0.0 {
        return Err(Error::ConfigLoadError(format!(
            "check.tolerance must be positive, got {}",
            tolerance
        )));
    }

    Ok(app_config)
}
