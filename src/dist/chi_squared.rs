//! Χ<sup>2</sup> over x in (0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::root_finding::invert_cdf;
use crate::traits::*;
use rand::Rng;
use special::Gamma as _;
use std::f64::consts::LN_2;
use std::fmt;

/// [Χ<sup>2</sup> distribution](https://en.wikipedia.org/wiki/Chi-squared_distribution)
/// Χ<sup>2</sup>(k).
///
/// # Example
///
/// ```
/// use distcan::prelude::*;
///
/// let x2 = ChiSquared::new(2.0).unwrap();
/// assert_eq!(x2.to_string(), "ChiSquared(k=2.00000)");
///
/// // Χ²(2) is exponential with mean 2
/// let x = 1.3_f64;
/// assert!((x2.cdf(&x) - (1.0 - (-x / 2.0).exp())).abs() < 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct ChiSquared {
    /// Degrees of freedom in (0, ∞)
    k: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ChiSquaredError {
    /// k parameter is less than or equal to zero
    KTooLow { k: f64 },
    /// k parameter is infinite or NaN
    KNotFinite { k: f64 },
}

impl ChiSquared {
    /// Create a new Chi-squared distribution
    ///
    /// # Arguments
    /// - k: Degrees of freedom in (0, ∞)
    #[inline]
    pub fn new(k: f64) -> Result<Self, ChiSquaredError> {
        if !k.is_finite() {
            Err(ChiSquaredError::KNotFinite { k })
        } else if k <= 0.0 {
            Err(ChiSquaredError::KTooLow { k })
        } else {
            Ok(ChiSquared { k })
        }
    }

    /// Create a new ChiSquared without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(k: f64) -> Self {
        ChiSquared { k }
    }

    /// Get the degrees of freedom, `k`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use distcan::dist::ChiSquared;
    /// let x2 = ChiSquared::new(1.2).unwrap();
    /// assert_eq!(x2.k(), 1.2);
    /// ```
    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    fn cdf_f64(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            (x / 2.0).inc_gamma(self.k / 2.0)
        }
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        invert_cdf(
            p,
            self.k,
            (0.0, f64::INFINITY),
            |x| self.cdf_f64(x),
            |x| self.f(&x),
        )
    }
}

impl Parameterized for ChiSquared {
    type Parameters = f64;

    fn emit_params(&self) -> Self::Parameters {
        self.k
    }

    fn from_params(k: Self::Parameters) -> Self {
        Self::new_unchecked(k)
    }
}

impl From<&ChiSquared> for String {
    fn from(x2: &ChiSquared) -> String {
        format!("ChiSquared(k={:.5})", x2.k)
    }
}

impl_display!(ChiSquared);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for ChiSquared {
            fn ln_f(&self, x: &$kind) -> f64 {
                let k2 = self.k / 2.0;
                let xf = f64::from(*x);
                (k2 - 1.0) * xf.ln() - xf / 2.0 - k2 * LN_2 - k2.ln_gamma().0
            }
        }

        impl Sampleable<$kind> for ChiSquared {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let x2 = rand_distr::ChiSquared::new(self.k).unwrap();
                rng.sample(x2) as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let x2 = rand_distr::ChiSquared::new(self.k).unwrap();
                (0..n).map(|_| rng.sample(x2) as $kind).collect()
            }
        }

        impl Support<$kind> for ChiSquared {
            fn supports(&self, x: &$kind) -> bool {
                *x > 0.0 && x.is_finite()
            }
        }

        impl ContinuousDistr<$kind> for ChiSquared {}

        impl Mean<$kind> for ChiSquared {
            fn mean(&self) -> Option<$kind> {
                Some(self.k as $kind)
            }
        }

        impl Median<$kind> for ChiSquared {
            fn median(&self) -> Option<$kind> {
                Some(self.invcdf_f64(0.5) as $kind)
            }
        }

        impl Mode<$kind> for ChiSquared {
            fn mode(&self) -> Option<$kind> {
                Some(0.0_f64.max(self.k - 2.0) as $kind)
            }
        }

        impl Cdf<$kind> for ChiSquared {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for ChiSquared {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                self.invcdf_f64(p) as $kind
            }
        }
    };
}

impl Variance<f64> for ChiSquared {
    fn variance(&self) -> Option<f64> {
        Some(self.k * 2.0)
    }
}

impl Entropy for ChiSquared {
    fn entropy(&self) -> f64 {
        let k2 = self.k / 2.0;
        k2 + LN_2 + k2.ln_gamma().0 + (1.0 - k2) * k2.digamma()
    }
}

impl Skewness for ChiSquared {
    fn skewness(&self) -> Option<f64> {
        Some((8.0 / self.k).sqrt())
    }
}

impl Kurtosis for ChiSquared {
    fn kurtosis(&self) -> Option<f64> {
        Some(12.0 / self.k)
    }
}

impl_traits!(f64);
impl_traits!(f32);

impl std::error::Error for ChiSquaredError {}

impl fmt::Display for ChiSquaredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KTooLow { k } => {
                write!(f, "k ({}) must be greater than zero", k)
            }
            Self::KNotFinite { k } => write!(f, "non-finite k: {}", k),
        }
    }
}
