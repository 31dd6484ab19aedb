//! Χ over x in (0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::ln_gammafn;
use crate::misc::root_finding::invert_cdf;
use crate::traits::*;
use rand::Rng;
use special::Gamma as _;
use std::f64::consts::LN_2;
use std::fmt;

/// [Χ distribution](https://en.wikipedia.org/wiki/Chi_distribution) Χ(k), the
/// distribution of the square root of a Χ<sup>2</sup>(k) variate.
///
/// ```math
///              2^(1-k/2)
/// f(x|k) = -------------- x^(k-1) e^(-x²/2)
///               Γ(k/2)
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Chi {
    /// Degrees of freedom in (0, ∞)
    k: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ChiError {
    /// k parameter is less than or equal to zero
    KTooLow { k: f64 },
    /// k parameter is infinite or NaN
    KNotFinite { k: f64 },
}

impl Chi {
    /// Create a new Chi distribution with `k` degrees of freedom
    ///
    /// # Example
    ///
    /// ```rust
    /// # use distcan::dist::Chi;
    /// assert!(Chi::new(3.0).is_ok());
    /// assert!(Chi::new(0.0).is_err());
    /// ```
    #[inline]
    pub fn new(k: f64) -> Result<Self, ChiError> {
        if !k.is_finite() {
            Err(ChiError::KNotFinite { k })
        } else if k <= 0.0 {
            Err(ChiError::KTooLow { k })
        } else {
            Ok(Chi { k })
        }
    }

    /// Create a new Chi without checking whether the parameters are valid.
    #[inline]
    pub fn new_unchecked(k: f64) -> Self {
        Chi { k }
    }

    /// Get the degrees of freedom, `k`.
    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    // E[X] = √2 Γ((k+1)/2) / Γ(k/2)
    fn mean_f64(&self) -> f64 {
        let k2 = self.k / 2.0;
        2.0_f64.sqrt() * (ln_gammafn(k2 + 0.5) - ln_gammafn(k2)).exp()
    }

    fn variance_f64(&self) -> f64 {
        let mu = self.mean_f64();
        mu.mul_add(-mu, self.k)
    }

    fn cdf_f64(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            (x * x / 2.0).inc_gamma(self.k / 2.0)
        }
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        invert_cdf(
            p,
            self.k.sqrt(),
            (0.0, f64::INFINITY),
            |x| self.cdf_f64(x),
            |x| self.f(&x),
        )
    }
}

impl Parameterized for Chi {
    type Parameters = f64;

    fn emit_params(&self) -> Self::Parameters {
        self.k
    }

    fn from_params(k: Self::Parameters) -> Self {
        Self::new_unchecked(k)
    }
}

impl From<&Chi> for String {
    fn from(chi: &Chi) -> String {
        format!("Chi(k={:.5})", chi.k)
    }
}

impl_display!(Chi);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for Chi {
            fn ln_f(&self, x: &$kind) -> f64 {
                let k2 = self.k / 2.0;
                let xf = f64::from(*x);
                (1.0 - k2).mul_add(LN_2, -ln_gammafn(k2))
                    + (self.k - 1.0).mul_add(xf.ln(), -xf * xf / 2.0)
            }
        }

        impl Sampleable<$kind> for Chi {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let x2 = rand_distr::ChiSquared::new(self.k).unwrap();
                rng.sample(x2).sqrt() as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let x2 = rand_distr::ChiSquared::new(self.k).unwrap();
                (0..n).map(|_| rng.sample(x2).sqrt() as $kind).collect()
            }
        }

        impl Support<$kind> for Chi {
            fn supports(&self, x: &$kind) -> bool {
                *x > 0.0 && x.is_finite()
            }
        }

        impl ContinuousDistr<$kind> for Chi {}

        impl Cdf<$kind> for Chi {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for Chi {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                self.invcdf_f64(p) as $kind
            }
        }

        impl Mean<$kind> for Chi {
            fn mean(&self) -> Option<$kind> {
                Some(self.mean_f64() as $kind)
            }
        }

        impl Median<$kind> for Chi {
            fn median(&self) -> Option<$kind> {
                Some(self.invcdf_f64(0.5) as $kind)
            }
        }

        impl Mode<$kind> for Chi {
            fn mode(&self) -> Option<$kind> {
                if self.k >= 1.0 {
                    Some((self.k - 1.0).sqrt() as $kind)
                } else {
                    None
                }
            }
        }
    };
}

impl Variance<f64> for Chi {
    fn variance(&self) -> Option<f64> {
        Some(self.variance_f64())
    }
}

impl Entropy for Chi {
    fn entropy(&self) -> f64 {
        let k2 = self.k / 2.0;
        ln_gammafn(k2)
            + 0.5 * (self.k - LN_2 - (self.k - 1.0) * k2.digamma())
    }
}

impl Skewness for Chi {
    fn skewness(&self) -> Option<f64> {
        let mu = self.mean_f64();
        let var = self.variance_f64();
        Some(mu / var.powf(1.5) * 2.0_f64.mul_add(-var, 1.0))
    }
}

impl Kurtosis for Chi {
    fn kurtosis(&self) -> Option<f64> {
        let mu = self.mean_f64();
        let var = self.variance_f64();
        let skew = mu / var.powf(1.5) * 2.0_f64.mul_add(-var, 1.0);
        Some(2.0 / var * (1.0 - mu * var.sqrt() * skew - var))
    }
}

impl_traits!(f64);
impl_traits!(f32);

impl std::error::Error for ChiError {}

impl fmt::Display for ChiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KTooLow { k } => {
                write!(f, "k ({}) must be greater than zero", k)
            }
            Self::KNotFinite { k } => write!(f, "non-finite k: {}", k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::ks_test;
    use crate::test_basic_impls;

    const TOL: f64 = 1E-12;

    test_basic_impls!([continuous] Chi::new(3.5).unwrap());

    #[test]
    fn new_should_reject_bad_k() {
        assert_eq!(Chi::new(0.0), Err(ChiError::KTooLow { k: 0.0 }));
        assert_eq!(
            Chi::new(f64::INFINITY),
            Err(ChiError::KNotFinite { k: f64::INFINITY })
        );
        assert_eq!(
            Chi::new(f64::NEG_INFINITY),
            Err(ChiError::KNotFinite {
                k: f64::NEG_INFINITY
            })
        );
    }

    #[test]
    fn display() {
        assert_eq!(Chi::new(3.5).unwrap().to_string(), "Chi(k=3.50000)");
    }

    #[test]
    fn ln_pdf() {
        let chi = Chi::new(3.5).unwrap();
        assert::close(chi.ln_pdf(&1.2_f64), -0.699_655_372_414_586_9, TOL);
        assert::close(chi.ln_pdf(&3.0_f64), -2.188_928_542_729_199, TOL);
    }

    #[test]
    fn k_one_is_half_normal() {
        let chi = Chi::new(1.0).unwrap();
        let x = 0.7_f64;
        let half_normal = (2.0 / std::f64::consts::PI).sqrt() * (-x * x / 2.0).exp();
        assert::close(chi.pdf(&x), half_normal, TOL);
    }

    #[test]
    fn cdf() {
        let chi = Chi::new(3.5).unwrap();
        assert::close(chi.cdf(&1.2_f64), 0.224_949_474_101_930_05, TOL);
        assert::close(chi.cdf(&3.0_f64), 0.956_709_160_535_489_4, TOL);
    }

    #[test]
    fn median() {
        let m: f64 = Chi::new(3.5).unwrap().median().unwrap();
        assert::close(m, 1.691_327_704_221_317, 1E-9);
    }

    #[test]
    fn moments() {
        let chi = Chi::new(3.5).unwrap();
        let mean: f64 = chi.mean().unwrap();
        let mode: f64 = chi.mode().unwrap();
        assert::close(mean, 1.743_416_033_421_836, 1E-10);
        assert::close(mode, 1.581_138_830_084_189_7, TOL);
        assert::close(chi.variance().unwrap(), 0.460_500_534_407_671_3, 1E-10);
        assert::close(chi.skewness().unwrap(), 0.440_734_495_644_932_8, 1E-9);
        assert::close(chi.kurtosis().unwrap(), 0.078_492_445_266_859_77, 1E-9);
    }

    #[test]
    fn mode_undefined_for_k_less_than_one() {
        let m: Option<f64> = Chi::new(0.5).unwrap().mode();
        assert!(m.is_none());
    }

    #[test]
    fn entropy() {
        let chi = Chi::new(3.5).unwrap();
        assert::close(chi.entropy(), 1.009_684_721_765_965_3, 1E-10);
    }

    #[test]
    fn draw_test() {
        let mut rng = rand::thread_rng();
        let chi = Chi::new(2.5).unwrap();
        let cdf = |x: f64| chi.cdf(&x);

        let passes = (0..5).fold(0, |acc, _| {
            let xs: Vec<f64> = chi.sample(1000, &mut rng);
            let (_, p) = ks_test(&xs, cdf);
            if p > 0.2 {
                acc + 1
            } else {
                acc
            }
        });
        assert!(passes > 0);
    }
}
