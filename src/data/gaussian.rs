#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::traits::SuffStat;

/// Running summary of Gaussian observations: count, mean, and the sum of
/// squared deviations from the mean.
///
/// This is everything the Normal Inverse Gamma posterior needs, so a stream
/// of data can be folded in (or retracted) one point at a time.
///
/// ```
/// use distcan::prelude::*;
///
/// let nig = NormalInverseGamma::new(0.0, 1.0, 2.0, 2.0).unwrap();
/// let xs = [1.1, -0.4, 2.7, 0.9, 1.6];
///
/// let stat = GaussianSuffStat::from(&xs[..]);
/// assert_eq!(nig.posterior_from_stat(&stat), nig.posterior(&xs));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct GaussianSuffStat {
    n: usize,
    mean: f64,
    // Σ (x - mean)²
    sx: f64,
}

impl GaussianSuffStat {
    #[inline]
    pub fn new() -> Self {
        Self::from_parts_unchecked(0, 0.0, 0.0)
    }

    /// Build from a count, a mean, and a sum of squared deviations. Nothing
    /// is validated.
    #[inline]
    pub fn from_parts_unchecked(n: usize, mean: f64, sx: f64) -> Self {
        GaussianSuffStat { n, mean, sx }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn sum_sq_dev(&self) -> f64 {
        self.sx
    }

    /// Σ x
    #[inline]
    pub fn sum_x(&self) -> f64 {
        self.mean * self.n as f64
    }

    /// Σ x²
    #[inline]
    pub fn sum_x_sq(&self) -> f64 {
        (self.mean * self.mean).mul_add(self.n as f64, self.sx)
    }

    /// Unbiased sample variance, `None` with fewer than two observations
    pub fn sample_variance(&self) -> Option<f64> {
        if self.n < 2 {
            None
        } else {
            Some(self.sx / (self.n - 1) as f64)
        }
    }

    fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        let mean = delta.mul_add((self.n as f64).recip(), self.mean);
        self.sx = delta.mul_add(x - mean, self.sx);
        self.mean = mean;
    }

    fn pop(&mut self, x: f64) {
        if self.n <= 1 {
            *self = Self::new();
            return;
        }
        let n = self.n as f64;
        let nm1 = n - 1.0;
        let mean = (n / nm1).mul_add(self.mean, -x / nm1);
        self.sx -= (x - mean) * (x - self.mean);
        self.mean = mean;
        self.n -= 1;
    }
}

impl Default for GaussianSuffStat {
    fn default() -> Self {
        GaussianSuffStat::new()
    }
}

macro_rules! impl_gaussian_suffstat {
    ($kind:ty) => {
        impl From<&[$kind]> for GaussianSuffStat {
            fn from(xs: &[$kind]) -> Self {
                let mut stat = GaussianSuffStat::new();
                stat.observe_many(xs);
                stat
            }
        }

        impl SuffStat<$kind> for GaussianSuffStat {
            fn n(&self) -> usize {
                self.n
            }

            fn observe(&mut self, x: &$kind) {
                self.push(f64::from(*x));
            }

            fn forget(&mut self, x: &$kind) {
                self.pop(f64::from(*x));
            }
        }
    };
}

impl_gaussian_suffstat!(f32);
impl_gaussian_suffstat!(f64);
