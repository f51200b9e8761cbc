use super::traits::Summation;

/// Block length below which [`PairwiseSum`] stops recursing.
pub const PAIRWISE_BLOCK: usize = 128;

/// Number of independent accumulators inside one pairwise block.
const UNROLL: usize = 8;

/// Plain indexed loop with a single accumulator, the way a C routine taking
/// `(length, pointer)` would be written.
///
/// Strict left-to-right order forms one long dependency chain on the
/// accumulator, so the compiler may not reassociate it into vector lanes.
pub struct IndexedLoop;

impl Summation for IndexedLoop {
    fn name(&self) -> &'static str {
        "indexed_loop"
    }

    #[allow(clippy::needless_range_loop)]
    fn sum(&self, values: &[f64]) -> f64 {
        let mut sum = 0.0;
        for i in 0..values.len() {
            sum += values[i];
        }
        sum
    }
}

/// The standard library's `Iterator::sum`.
pub struct IteratorSum;

impl Summation for IteratorSum {
    fn name(&self) -> &'static str {
        "iterator_sum"
    }

    fn sum(&self, values: &[f64]) -> f64 {
        values.iter().sum()
    }
}

/// Reassociated sum over `LANES` independent accumulators.
///
/// Splitting the accumulator breaks the dependency chain of [`IndexedLoop`];
/// the fixed-size lane array maps directly onto vector registers.
pub struct LaneSum<const LANES: usize>;

impl<const LANES: usize> Summation for LaneSum<LANES> {
    fn name(&self) -> &'static str {
        match LANES {
            2 => "lane_sum_x2",
            4 => "lane_sum_x4",
            8 => "lane_sum_x8",
            16 => "lane_sum_x16",
            _ => "lane_sum",
        }
    }

    fn sum(&self, values: &[f64]) -> f64 {
        const { assert!(LANES > 0, "LaneSum needs at least one lane") };

        let mut lanes = [0.0_f64; LANES];
        let chunks = values.chunks_exact(LANES);
        let tail = chunks.remainder();

        for chunk in chunks {
            for (acc, &x) in lanes.iter_mut().zip(chunk) {
                *acc += x;
            }
        }

        lanes.iter().sum::<f64>() + tail.iter().sum::<f64>()
    }
}

/// Pairwise summation as used by vectorised array libraries.
///
/// Slices of at most [`PAIRWISE_BLOCK`] elements are summed with eight
/// interleaved accumulators, combined as a balanced tree. Longer slices are
/// split in half (on a multiple of eight) and summed recursively, so the
/// rounding error grows with `log n` instead of `n`.
pub struct PairwiseSum;

impl PairwiseSum {
    fn pairwise(values: &[f64]) -> f64 {
        let n = values.len();

        if n < UNROLL {
            let mut sum = 0.0;
            for &x in values {
                sum += x;
            }
            sum
        } else if n <= PAIRWISE_BLOCK {
            let mut r = [0.0_f64; UNROLL];
            r.copy_from_slice(&values[..UNROLL]);

            let body_end = n - n % UNROLL;
            for block in values[UNROLL..body_end].chunks_exact(UNROLL) {
                for (acc, &x) in r.iter_mut().zip(block) {
                    *acc += x;
                }
            }

            let mut sum = ((r[0] + r[1]) + (r[2] + r[3])) + ((r[4] + r[5]) + (r[6] + r[7]));
            for &x in &values[body_end..] {
                sum += x;
            }
            sum
        } else {
            let mut half = n / 2;
            half -= half % UNROLL;
            Self::pairwise(&values[..half]) + Self::pairwise(&values[half..])
        }
    }
}

impl Summation for PairwiseSum {
    fn name(&self) -> &'static str {
        "pairwise_sum"
    }

    fn sum(&self, values: &[f64]) -> f64 {
        Self::pairwise(values)
    }
}

/// Neumaier-compensated summation.
///
/// Carries the low-order bits lost by each addition in a separate
/// compensation term. Accurate to within a couple of ulps of the exact sum
/// regardless of length, which makes it the reference the other routines are
/// checked against.
pub struct CompensatedSum;

impl Summation for CompensatedSum {
    fn name(&self) -> &'static str {
        "compensated_sum"
    }

    fn sum(&self, values: &[f64]) -> f64 {
        let mut sum = 0.0_f64;
        let mut compensation = 0.0_f64;

        for &x in values {
            let t = sum + x;
            if sum.abs() >= x.abs() {
                compensation += (sum - t) + x;
            } else {
                compensation += (x - t) + sum;
            }
            sum = t;
        }

        sum + compensation
    }
}

/// Trusted reference sum used to validate every other routine.
pub fn reference_sum(values: &[f64]) -> f64 {
    CompensatedSum.sum(values)
}

/// Every unboxed routine under comparison, in report order.
pub fn all_routines() -> Vec<Box<dyn Summation>> {
    vec![
        Box::new(IndexedLoop),
        Box::new(IteratorSum),
        Box::new(LaneSum::<4>),
        Box::new(LaneSum::<8>),
        Box::new(PairwiseSum),
        Box::new(CompensatedSum),
    ]
}
