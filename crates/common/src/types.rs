use std::ops::{Deref, Sub};

use num_complex::Complex;

use super::error::Error;

/// A numeric result that can be compared against a reference.
///
/// Implemented for real and complex floating-point values. `magnitude` is the
/// absolute value for reals and the modulus for complex numbers.
pub trait Scalar: Copy + Sub<Output = Self> {
    fn magnitude(self) -> f64;
}

impl Scalar for f64 {
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl Scalar for f32 {
    fn magnitude(self) -> f64 {
        f64::from(self.abs())
    }
}

impl Scalar for Complex<f64> {
    fn magnitude(self) -> f64 {
        self.norm()
    }
}

impl Scalar for Complex<f32> {
    fn magnitude(self) -> f64 {
        f64::from(self.norm())
    }
}

/// Immutable, fixed-length array of samples shared by every routine under test.
///
/// The values live in a single contiguous allocation. Routines borrow the
/// slice through `Deref`; nothing hands out ownership or mutable access.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleArray {
    values: Box<[f64]>,
}

impl SampleArray {
    /// Wraps a non-empty vector of samples.
    pub fn new(values: Vec<f64>) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::EmptySample);
        }
        Ok(Self {
            values: values.into_boxed_slice(),
        })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl Deref for SampleArray {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}
