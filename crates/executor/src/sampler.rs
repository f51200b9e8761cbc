use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::error::Error;
use super::types::SampleSource;
use common::types::SampleArray;

/// Produces a sample of independent values drawn uniformly from `[0, 1)`.
///
/// With a seed the sample is reproducible across runs; without one the
/// generator is seeded from OS entropy.
pub struct UniformSampler {
    pub len: usize,  // number of samples
    pub seed: Option<u64>,
}

impl UniformSampler {
    pub fn new(len: usize, seed: Option<u64>) -> Self {
        UniformSampler { len, seed }
    }
}

impl SampleSource for UniformSampler {
    fn load(self) -> Result<SampleArray, Error> {
        let mut rng: SmallRng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let values: Vec<f64> = (0..self.len).map(|_| rng.random::<f64>()).collect();

        info!(len = self.len, seed = ?self.seed, "Generated uniform sample");
        Ok(SampleArray::new(values)?)
    }
}
