//! Log-normal distribution over x in (0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use std::fmt;

use crate::dist::{Gaussian, GaussianParameters};
use crate::impl_display;
use crate::traits::*;

/// [Log-normal distribution](https://en.wikipedia.org/wiki/Log-normal_distribution),
/// the law of e<sup>y</sup> for y ~ N(μ, σ).
///
/// Everything is computed on the log scale through the underlying
/// [`Gaussian`], so `mu` and `sigma` are the mean and standard deviation of
/// ln x, not of x.
///
/// # Example
///
/// ```
/// use distcan::prelude::*;
///
/// let lognormal = LogNormal::new(0.3, 0.6).unwrap();
///
/// // the median is exp(mu), the mode sits below it and the mean above
/// let mode: f64 = lognormal.mode().unwrap();
/// let median: f64 = lognormal.median().unwrap();
/// let mean: f64 = lognormal.mean().unwrap();
/// assert!(mode < median && median < mean);
/// assert!((lognormal.cdf(&median) - 0.5).abs() < 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde1",
    serde(try_from = "GaussianParameters", into = "GaussianParameters")
)]
pub struct LogNormal {
    // distribution of ln x
    log: Gaussian,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum LogNormalError {
    /// mu is infinite or NaN
    MuNotFinite { mu: f64 },
    /// sigma is zero or negative
    SigmaTooLow { sigma: f64 },
    /// sigma is infinite or NaN
    SigmaNotFinite { sigma: f64 },
}

impl LogNormal {
    /// Create a log-normal whose logarithm is N(`mu`, `sigma`)
    #[inline]
    pub fn new(mu: f64, sigma: f64) -> Result<Self, LogNormalError> {
        if !mu.is_finite() {
            Err(LogNormalError::MuNotFinite { mu })
        } else if !sigma.is_finite() {
            Err(LogNormalError::SigmaNotFinite { sigma })
        } else if sigma <= 0.0 {
            Err(LogNormalError::SigmaTooLow { sigma })
        } else {
            Ok(LogNormal::new_unchecked(mu, sigma))
        }
    }

    #[inline]
    pub fn new_unchecked(mu: f64, sigma: f64) -> Self {
        LogNormal {
            log: Gaussian::new_unchecked(mu, sigma),
        }
    }

    /// The exponential of a standard normal
    #[inline]
    pub fn standard() -> Self {
        LogNormal {
            log: Gaussian::standard(),
        }
    }

    /// Mean of ln x
    #[inline]
    pub fn mu(&self) -> f64 {
        self.log.mu()
    }

    /// Standard deviation of ln x
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.log.sigma()
    }

    /// `(mu, sigma)`
    #[inline]
    pub fn params(&self) -> (f64, f64) {
        self.log.params()
    }

    /// The normal distribution of ln x
    ///
    /// ```
    /// # use distcan::dist::{Gaussian, LogNormal};
    /// let lognormal = LogNormal::new(0.3, 0.6).unwrap();
    /// assert_eq!(lognormal.log_scale(), &Gaussian::new(0.3, 0.6).unwrap());
    /// ```
    #[inline]
    pub fn log_scale(&self) -> &Gaussian {
        &self.log
    }

    fn s2(&self) -> f64 {
        let sigma = self.sigma();
        sigma * sigma
    }

    fn ln_f64(&self, x: f64) -> f64 {
        let ln_x = x.ln();
        self.log.ln_f(&ln_x) - ln_x
    }

    fn cdf_f64(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            self.log.cdf(&x.ln())
        }
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        let y: f64 = self.log.invcdf(p);
        y.exp()
    }
}

impl Default for LogNormal {
    fn default() -> Self {
        LogNormal::standard()
    }
}

impl Parameterized for LogNormal {
    type Parameters = (f64, f64);

    fn emit_params(&self) -> Self::Parameters {
        self.params()
    }

    fn from_params((mu, sigma): Self::Parameters) -> Self {
        Self::new_unchecked(mu, sigma)
    }
}

impl TryFrom<GaussianParameters> for LogNormal {
    type Error = LogNormalError;

    fn try_from(params: GaussianParameters) -> Result<Self, Self::Error> {
        LogNormal::new(params.mu, params.sigma)
    }
}

impl From<LogNormal> for GaussianParameters {
    fn from(lognormal: LogNormal) -> Self {
        lognormal.log.emit_params()
    }
}

impl From<&LogNormal> for String {
    fn from(lognormal: &LogNormal) -> String {
        let (mu, sigma) = lognormal.params();
        format!("LogNormal(mu={:.5}, sigma={:.5})", mu, sigma)
    }
}

impl_display!(LogNormal);

macro_rules! impl_traits {
    ($kind: ty) => {
        impl HasDensity<$kind> for LogNormal {
            fn ln_f(&self, x: &$kind) -> f64 {
                self.ln_f64(f64::from(*x))
            }
        }

        impl Sampleable<$kind> for LogNormal {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let y: f64 = self.log.draw(rng);
                y.exp() as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let ys: Vec<f64> = self.log.sample(n, rng);
                ys.into_iter().map(|y| y.exp() as $kind).collect()
            }
        }

        impl Support<$kind> for LogNormal {
            fn supports(&self, x: &$kind) -> bool {
                x.is_finite() && *x > 0.0
            }
        }

        impl ContinuousDistr<$kind> for LogNormal {}

        impl Cdf<$kind> for LogNormal {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for LogNormal {
            fn invcdf(&self, p: f64) -> $kind {
                self.invcdf_f64(p) as $kind
            }
        }

        impl Mean<$kind> for LogNormal {
            fn mean(&self) -> Option<$kind> {
                Some(0.5_f64.mul_add(self.s2(), self.mu()).exp() as $kind)
            }
        }

        impl Median<$kind> for LogNormal {
            fn median(&self) -> Option<$kind> {
                Some(self.mu().exp() as $kind)
            }
        }

        impl Mode<$kind> for LogNormal {
            fn mode(&self) -> Option<$kind> {
                Some((self.mu() - self.s2()).exp() as $kind)
            }
        }
    };
}

impl_traits!(f64);
impl_traits!(f32);

impl Variance<f64> for LogNormal {
    fn variance(&self) -> Option<f64> {
        let s2 = self.s2();
        Some(s2.exp_m1() * 2.0_f64.mul_add(self.mu(), s2).exp())
    }
}

impl Entropy for LogNormal {
    /// Entropy of ln x shifted by E[ln x]
    fn entropy(&self) -> f64 {
        self.log.entropy() + self.mu()
    }
}

impl Skewness for LogNormal {
    fn skewness(&self) -> Option<f64> {
        let w = self.s2().exp();
        Some((w + 2.0) * (w - 1.0).sqrt())
    }
}

impl Kurtosis for LogNormal {
    fn kurtosis(&self) -> Option<f64> {
        // w⁴ + 2w³ + 3w² - 6 with w = exp(σ²)
        let w = self.s2().exp();
        let w2 = w * w;
        Some(w2.mul_add(w2 + 2.0 * w + 3.0, -6.0))
    }
}

impl std::error::Error for LogNormalError {}

impl fmt::Display for LogNormalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuNotFinite { mu } => {
                write!(f, "log-scale mu must be finite, got {}", mu)
            }
            Self::SigmaTooLow { sigma } => {
                write!(f, "log-scale sigma must be positive, got {}", sigma)
            }
            Self::SigmaNotFinite { sigma } => {
                write!(f, "log-scale sigma must be finite, got {}", sigma)
            }
        }
    }
}
