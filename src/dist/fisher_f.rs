//! Fisher-Snedecor F distribution over x in (0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::ln_gammafn;
use crate::traits::*;
use rand::Rng;
use special::Beta as _;
use special::Gamma as _;
use std::fmt;
use std::sync::OnceLock;

/// [F distribution](https://en.wikipedia.org/wiki/F-distribution) F(d1, d2),
/// the ratio of two scaled Χ<sup>2</sup> variates with d1 and d2 degrees of
/// freedom.
///
/// # Example
///
/// ```
/// use distcan::prelude::*;
///
/// let f = FisherF::new(4.5, 11.0).unwrap();
/// assert_eq!(f.to_string(), "F(d1=4.50000, d2=11.00000)");
///
/// let q: f64 = f.quantile(0.95);
/// assert!((f.cdf(&q) - 0.95).abs() < 1E-10);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct FisherF {
    d1: f64,
    d2: f64,
    // ln B(d1/2, d2/2)
    #[cfg_attr(feature = "serde1", serde(skip))]
    ln_beta_half: OnceLock<f64>,
}

impl PartialEq for FisherF {
    fn eq(&self, other: &FisherF) -> bool {
        self.d1 == other.d1 && self.d2 == other.d2
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum FisherFError {
    /// d1 is less than or equal to zero
    D1TooLow { d1: f64 },
    /// d1 is infinite or NaN
    D1NotFinite { d1: f64 },
    /// d2 is less than or equal to zero
    D2TooLow { d2: f64 },
    /// d2 is infinite or NaN
    D2NotFinite { d2: f64 },
}

impl FisherF {
    /// Create a new F distribution with numerator and denominator degrees of
    /// freedom, `d1` and `d2`.
    pub fn new(d1: f64, d2: f64) -> Result<Self, FisherFError> {
        if !d1.is_finite() {
            Err(FisherFError::D1NotFinite { d1 })
        } else if !d2.is_finite() {
            Err(FisherFError::D2NotFinite { d2 })
        } else if d1 <= 0.0 {
            Err(FisherFError::D1TooLow { d1 })
        } else if d2 <= 0.0 {
            Err(FisherFError::D2TooLow { d2 })
        } else {
            Ok(FisherF::new_unchecked(d1, d2))
        }
    }

    /// Creates a new FisherF without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(d1: f64, d2: f64) -> Self {
        FisherF {
            d1,
            d2,
            ln_beta_half: OnceLock::new(),
        }
    }

    /// Numerator degrees of freedom
    #[inline]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// Denominator degrees of freedom
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// Returns `(d1, d2)`
    #[inline]
    pub fn params(&self) -> (f64, f64) {
        (self.d1, self.d2)
    }

    #[inline]
    fn ln_beta_half(&self) -> f64 {
        *self
            .ln_beta_half
            .get_or_init(|| (self.d1 / 2.0).ln_beta(self.d2 / 2.0))
    }

    fn cdf_f64(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let d1x = self.d1 * x;
        let z = d1x / (d1x + self.d2);
        z.inc_beta(self.d1 / 2.0, self.d2 / 2.0, self.ln_beta_half())
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        if p >= 1.0 {
            return f64::INFINITY;
        }
        let z = p.inv_inc_beta(self.d1 / 2.0, self.d2 / 2.0, self.ln_beta_half());
        self.d2 * z / (self.d1 * (1.0 - z))
    }
}

impl Parameterized for FisherF {
    type Parameters = (f64, f64);

    fn emit_params(&self) -> Self::Parameters {
        self.params()
    }

    fn from_params((d1, d2): Self::Parameters) -> Self {
        Self::new_unchecked(d1, d2)
    }
}

impl From<&FisherF> for String {
    fn from(f: &FisherF) -> String {
        format!("F(d1={:.5}, d2={:.5})", f.d1, f.d2)
    }
}

impl_display!(FisherF);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for FisherF {
            fn ln_f(&self, x: &$kind) -> f64 {
                let xf = f64::from(*x);
                let d1x = self.d1 * xf;
                let numer = self.d1.mul_add(
                    d1x.ln(),
                    self.d2.mul_add(
                        self.d2.ln(),
                        -(self.d1 + self.d2) * (d1x + self.d2).ln(),
                    ),
                );
                0.5 * numer - xf.ln() - self.ln_beta_half()
            }
        }

        impl Sampleable<$kind> for FisherF {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let f = rand_distr::FisherF::new(self.d1, self.d2).unwrap();
                rng.sample(f) as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let f = rand_distr::FisherF::new(self.d1, self.d2).unwrap();
                (0..n).map(|_| rng.sample(f) as $kind).collect()
            }
        }

        impl Support<$kind> for FisherF {
            fn supports(&self, x: &$kind) -> bool {
                *x > 0.0 && x.is_finite()
            }
        }

        impl ContinuousDistr<$kind> for FisherF {}

        impl Cdf<$kind> for FisherF {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for FisherF {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                self.invcdf_f64(p) as $kind
            }
        }

        impl Mean<$kind> for FisherF {
            fn mean(&self) -> Option<$kind> {
                if self.d2 > 2.0 {
                    Some((self.d2 / (self.d2 - 2.0)) as $kind)
                } else {
                    None
                }
            }
        }

        impl Median<$kind> for FisherF {
            fn median(&self) -> Option<$kind> {
                Some(self.invcdf_f64(0.5) as $kind)
            }
        }

        impl Mode<$kind> for FisherF {
            fn mode(&self) -> Option<$kind> {
                if self.d1 > 2.0 {
                    let m = (self.d1 - 2.0) / self.d1 * self.d2
                        / (self.d2 + 2.0);
                    Some(m as $kind)
                } else {
                    None
                }
            }
        }
    };
}

impl Variance<f64> for FisherF {
    fn variance(&self) -> Option<f64> {
        let (d1, d2) = self.params();
        if d2 > 4.0 {
            let d2m2 = d2 - 2.0;
            Some(2.0 * d2 * d2 * (d1 + d2 - 2.0) / (d1 * d2m2 * d2m2 * (d2 - 4.0)))
        } else {
            None
        }
    }
}

impl Entropy for FisherF {
    fn entropy(&self) -> f64 {
        let h1 = self.d1 / 2.0;
        let h2 = self.d2 / 2.0;
        let hs = h1 + h2;
        ln_gammafn(h1) + ln_gammafn(h2) - ln_gammafn(hs)
            + (1.0 - h1) * h1.digamma()
            - (1.0 + h2) * h2.digamma()
            + hs * hs.digamma()
            + (self.d2 / self.d1).ln()
    }
}

impl Skewness for FisherF {
    fn skewness(&self) -> Option<f64> {
        let (d1, d2) = self.params();
        if d2 > 6.0 {
            let numer = 2.0_f64.mul_add(d1, d2 - 2.0) * (8.0 * (d2 - 4.0)).sqrt();
            let denom = (d2 - 6.0) * (d1 * (d1 + d2 - 2.0)).sqrt();
            Some(numer / denom)
        } else {
            None
        }
    }
}

impl Kurtosis for FisherF {
    fn kurtosis(&self) -> Option<f64> {
        let (d1, d2) = self.params();
        if d2 > 8.0 {
            let d2m2 = d2 - 2.0;
            let numer = d1 * 5.0_f64.mul_add(d2, -22.0) * (d1 + d2 - 2.0)
                + (d2 - 4.0) * d2m2 * d2m2;
            let denom = d1 * (d2 - 6.0) * (d2 - 8.0) * (d1 + d2 - 2.0);
            Some(12.0 * numer / denom)
        } else {
            None
        }
    }
}

impl_traits!(f64);
impl_traits!(f32);

impl std::error::Error for FisherFError {}

impl fmt::Display for FisherFError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::D1TooLow { d1 } => {
                write!(f, "d1 ({}) must be greater than zero", d1)
            }
            Self::D1NotFinite { d1 } => write!(f, "non-finite d1: {}", d1),
            Self::D2TooLow { d2 } => {
                write!(f, "d2 ({}) must be greater than zero", d2)
            }
            Self::D2NotFinite { d2 } => write!(f, "non-finite d2: {}", d2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::ks_test;
    use crate::test_basic_impls;

    const TOL: f64 = 1E-12;

    test_basic_impls!([continuous] FisherF::new(4.5, 11.0).unwrap());

    #[test]
    fn new_should_reject_bad_params() {
        assert_eq!(
            FisherF::new(0.0, 1.0),
            Err(FisherFError::D1TooLow { d1: 0.0 })
        );
        assert_eq!(
            FisherF::new(1.0, -2.0),
            Err(FisherFError::D2TooLow { d2: -2.0 })
        );
        assert!(matches!(
            FisherF::new(f64::NAN, 1.0),
            Err(FisherFError::D1NotFinite { .. })
        ));
        assert!(matches!(
            FisherF::new(1.0, f64::INFINITY),
            Err(FisherFError::D2NotFinite { .. })
        ));
    }

    #[test]
    fn ln_pdf() {
        let f = FisherF::new(4.5, 11.0).unwrap();
        assert::close(f.ln_pdf(&0.7_f64), -0.465_761_159_672_551_2, TOL);
        assert::close(f.ln_pdf(&3.1_f64), -3.001_148_625_724_438, TOL);
    }

    #[test]
    fn cdf() {
        let f = FisherF::new(4.5, 11.0).unwrap();
        assert::close(f.cdf(&0.7_f64), 0.377_702_547_625_081_1, TOL);
        assert::close(f.cdf(&3.1_f64), 0.942_078_625_010_849_6, TOL);
        assert_eq!(f.cdf(&0.0_f64), 0.0);
    }

    #[test]
    fn quantile_and_median() {
        let f = FisherF::new(4.5, 11.0).unwrap();
        let q: f64 = f.quantile(0.95);
        assert::close(q, 3.273_309_070_950_405, 1E-9);

        let m: f64 = f.median().unwrap();
        assert::close(m, 0.911_369_753_709_192_3, 1E-9);
    }

    #[test]
    fn moments() {
        let f = FisherF::new(4.5, 11.0).unwrap();
        let mean: f64 = f.mean().unwrap();
        let mode: f64 = f.mode().unwrap();
        assert::close(mean, 11.0 / 9.0, TOL);
        assert::close(mode, 0.470_085_470_085_470_1, TOL);
        assert::close(f.variance().unwrap(), 1.280_423_280_423_280_4, TOL);
        assert::close(f.skewness().unwrap(), 3.456_395_039_150_858_8, 1E-10);
        assert::close(f.kurtosis().unwrap(), 33.866_666_666_666_67, 1E-9);
    }

    #[test]
    fn moments_undefined_for_small_d2() {
        let f = FisherF::new(4.5, 2.0).unwrap();
        let mean: Option<f64> = f.mean();
        assert!(mean.is_none());
        assert!(f.variance().is_none());
        assert!(f.skewness().is_none());
        assert!(f.kurtosis().is_none());

        let mode: Option<f64> = FisherF::new(2.0, 5.0).unwrap().mode();
        assert!(mode.is_none());
    }

    #[test]
    fn entropy() {
        let f = FisherF::new(4.5, 11.0).unwrap();
        assert::close(f.entropy(), 1.122_141_224_037_353_3, 1E-10);
    }

    #[test]
    fn draw_test() {
        let mut rng = rand::thread_rng();
        let f = FisherF::new(4.5, 11.0).unwrap();
        let cdf = |x: f64| f.cdf(&x);

        let passes = (0..5).fold(0, |acc, _| {
            let xs: Vec<f64> = f.sample(1000, &mut rng);
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
