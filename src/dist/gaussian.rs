//! Normal distribution over the real line
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use special::Error as _;
use std::f64::consts::SQRT_2;
use std::fmt;

use crate::consts::{HALF_LN_2PI, HALF_LN_2PI_E};
use crate::impl_display;
use crate::traits::*;

/// [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution)
/// N(μ, σ), parameterized by its mean and standard deviation. Also available
/// as [`Normal`](crate::dist::Normal).
///
/// This is the likelihood the [`NormalInverseGamma`](crate::dist::NormalInverseGamma)
/// is conjugate to, and the type its `Gaussian`-valued draws return.
///
/// # Example
///
/// A 95% central interval.
///
/// ```
/// use distcan::prelude::*;
///
/// let normal = Normal::new(2.5, 0.8).unwrap();
/// let (lo, hi): (f64, f64) = normal.interval(0.95);
///
/// assert!((lo - 0.932_028_812_367_956_6).abs() < 1E-9);
/// assert!((hi - 4.067_971_187_632_043).abs() < 1E-9);
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde1",
    serde(try_from = "GaussianParameters", into = "GaussianParameters")
)]
pub struct Gaussian {
    mu: f64,
    sigma: f64,
}

/// Serialized form of a [`Gaussian`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct GaussianParameters {
    pub mu: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum GaussianError {
    /// mu is infinite or NaN
    MuNotFinite { mu: f64 },
    /// sigma is zero or negative
    SigmaTooLow { sigma: f64 },
    /// sigma is infinite or NaN
    SigmaNotFinite { sigma: f64 },
}

impl Gaussian {
    /// Create a Normal with mean `mu` and standard deviation `sigma`
    pub fn new(mu: f64, sigma: f64) -> Result<Self, GaussianError> {
        if !mu.is_finite() {
            Err(GaussianError::MuNotFinite { mu })
        } else if !sigma.is_finite() {
            Err(GaussianError::SigmaNotFinite { sigma })
        } else if sigma <= 0.0 {
            Err(GaussianError::SigmaTooLow { sigma })
        } else {
            Ok(Gaussian { mu, sigma })
        }
    }

    /// Create a Normal without validating `mu` or `sigma`
    #[inline]
    #[must_use]
    pub fn new_unchecked(mu: f64, sigma: f64) -> Self {
        Gaussian { mu, sigma }
    }

    /// N(0, 1)
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Gaussian::new_unchecked(0.0, 1.0)
    }

    #[inline]
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    #[inline]
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// `(mu, sigma)`
    #[inline]
    #[must_use]
    pub fn params(&self) -> (f64, f64) {
        (self.mu, self.sigma)
    }

    #[inline]
    fn z(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }

    fn ln_f64(&self, x: f64) -> f64 {
        let z = self.z(x);
        (-0.5 * z).mul_add(z, -self.sigma.ln()) - HALF_LN_2PI
    }

    fn cdf_f64(&self, x: f64) -> f64 {
        0.5 * (1.0 + (self.z(x) / SQRT_2).error())
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        let z = SQRT_2 * 2.0_f64.mul_add(p, -1.0).inv_error();
        self.sigma.mul_add(z, self.mu)
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Gaussian::standard()
    }
}

impl TryFrom<GaussianParameters> for Gaussian {
    type Error = GaussianError;

    fn try_from(params: GaussianParameters) -> Result<Self, Self::Error> {
        Gaussian::new(params.mu, params.sigma)
    }
}

impl From<Gaussian> for GaussianParameters {
    fn from(gauss: Gaussian) -> Self {
        gauss.emit_params()
    }
}

impl Parameterized for Gaussian {
    type Parameters = GaussianParameters;

    fn emit_params(&self) -> GaussianParameters {
        let (mu, sigma) = self.params();
        GaussianParameters { mu, sigma }
    }

    fn from_params(params: GaussianParameters) -> Self {
        Gaussian::new_unchecked(params.mu, params.sigma)
    }
}

impl From<&Gaussian> for String {
    fn from(gauss: &Gaussian) -> String {
        format!("Normal(mu={:.5}, sigma={:.5})", gauss.mu, gauss.sigma)
    }
}

impl_display!(Gaussian);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for Gaussian {
            fn ln_f(&self, x: &$kind) -> f64 {
                self.ln_f64(f64::from(*x))
            }
        }

        impl Sampleable<$kind> for Gaussian {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let normal =
                    rand_distr::Normal::new(self.mu, self.sigma).unwrap();
                rng.sample(normal) as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let normal =
                    rand_distr::Normal::new(self.mu, self.sigma).unwrap();
                rng.sample_iter(normal).take(n).map(|x| x as $kind).collect()
            }
        }

        impl Support<$kind> for Gaussian {
            fn supports(&self, x: &$kind) -> bool {
                x.is_finite()
            }
        }

        impl ContinuousDistr<$kind> for Gaussian {}

        impl Cdf<$kind> for Gaussian {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for Gaussian {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                self.invcdf_f64(p) as $kind
            }
        }

        // symmetric and unimodal: mean, median, and mode coincide
        impl Mean<$kind> for Gaussian {
            fn mean(&self) -> Option<$kind> {
                Some(self.mu as $kind)
            }
        }

        impl Median<$kind> for Gaussian {
            fn median(&self) -> Option<$kind> {
                Some(self.mu as $kind)
            }
        }

        impl Mode<$kind> for Gaussian {
            fn mode(&self) -> Option<$kind> {
                Some(self.mu as $kind)
            }
        }
    };
}

impl_traits!(f64);
impl_traits!(f32);

impl Variance<f64> for Gaussian {
    fn variance(&self) -> Option<f64> {
        Some(self.sigma * self.sigma)
    }
}

impl Entropy for Gaussian {
    fn entropy(&self) -> f64 {
        HALF_LN_2PI_E + self.sigma.ln()
    }
}

impl Skewness for Gaussian {
    fn skewness(&self) -> Option<f64> {
        Some(0.0)
    }
}

impl Kurtosis for Gaussian {
    fn kurtosis(&self) -> Option<f64> {
        Some(0.0)
    }
}

impl std::error::Error for GaussianError {}

impl fmt::Display for GaussianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuNotFinite { mu } => {
                write!(f, "mu must be finite, got {}", mu)
            }
            Self::SigmaTooLow { sigma } => {
                write!(f, "sigma must be positive, got {}", sigma)
            }
            Self::SigmaNotFinite { sigma } => {
                write!(f, "sigma must be finite, got {}", sigma)
            }
        }
    }
}
