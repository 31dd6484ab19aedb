//! Gamma distribution over x in (0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::root_finding::invert_cdf;
use crate::traits::*;
use rand::Rng;
use special::Gamma as _;
use std::cell::OnceCell;
use std::fmt;

/// [Gamma distribution](https://en.wikipedia.org/wiki/Gamma_distribution) G(α, θ)
/// over x in (0, ∞).
///
/// **NOTE**: The gamma distribution is parameterized in terms of shape, α, and
/// scale, θ, so the mean is αθ.
///
/// ```math
///                  1
/// f(x|α, θ) = ----------  x^(α-1) e^(-x/θ)
///              Γ(α) θ^α
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Gamma {
    shape: f64,
    scale: f64,
    // ln(gamma(shape))
    #[cfg_attr(feature = "serde1", serde(skip))]
    ln_gamma_shape: OnceCell<f64>,
    // ln(scale)
    #[cfg_attr(feature = "serde1", serde(skip))]
    ln_scale: OnceCell<f64>,
}

impl PartialEq for Gamma {
    fn eq(&self, other: &Gamma) -> bool {
        self.shape == other.shape && self.scale == other.scale
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum GammaError {
    /// Shape parameter is less than or equal to zero
    ShapeTooLow { shape: f64 },
    /// Shape parameter is infinite or NaN
    ShapeNotFinite { shape: f64 },
    /// Scale parameter is less than or equal to zero
    ScaleTooLow { scale: f64 },
    /// Scale parameter is infinite or NaN
    ScaleNotFinite { scale: f64 },
}

impl Gamma {
    /// Create a new `Gamma` distribution with shape (α) and scale (θ).
    pub fn new(shape: f64, scale: f64) -> Result<Self, GammaError> {
        if !shape.is_finite() {
            Err(GammaError::ShapeNotFinite { shape })
        } else if !scale.is_finite() {
            Err(GammaError::ScaleNotFinite { scale })
        } else if shape <= 0.0 {
            Err(GammaError::ShapeTooLow { shape })
        } else if scale <= 0.0 {
            Err(GammaError::ScaleTooLow { scale })
        } else {
            Ok(Gamma::new_unchecked(shape, scale))
        }
    }

    /// Creates a new Gamma without checking whether the parameters are valid.
    #[inline]
    pub fn new_unchecked(shape: f64, scale: f64) -> Self {
        Gamma {
            shape,
            scale,
            ln_gamma_shape: OnceCell::new(),
            ln_scale: OnceCell::new(),
        }
    }

    #[inline]
    fn ln_scale(&self) -> f64 {
        *self.ln_scale.get_or_init(|| self.scale.ln())
    }

    #[inline]
    fn ln_gamma_shape(&self) -> f64 {
        *self.ln_gamma_shape.get_or_init(|| self.shape.ln_gamma().0)
    }

    /// Get the shape parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// # use distcan::dist::Gamma;
    /// let gam = Gamma::new(2.0, 1.0).unwrap();
    /// assert_eq!(gam.shape(), 2.0);
    /// ```
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Get the scale parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// # use distcan::dist::Gamma;
    /// let gam = Gamma::new(2.0, 1.5).unwrap();
    /// assert_eq!(gam.scale(), 1.5);
    /// ```
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns `(shape, scale)`
    #[inline]
    pub fn params(&self) -> (f64, f64) {
        (self.shape, self.scale)
    }

    fn cdf_f64(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            (x / self.scale).inc_gamma(self.shape)
        }
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        let x0 = self.shape * self.scale;
        invert_cdf(
            p,
            x0,
            (0.0, f64::INFINITY),
            |x| self.cdf_f64(x),
            |x| self.f(&x),
        )
    }
}

impl Default for Gamma {
    fn default() -> Self {
        Gamma::new_unchecked(1.0, 1.0)
    }
}

impl Parameterized for Gamma {
    type Parameters = (f64, f64);

    fn emit_params(&self) -> Self::Parameters {
        self.params()
    }

    fn from_params((shape, scale): Self::Parameters) -> Self {
        Self::new_unchecked(shape, scale)
    }
}

impl From<&Gamma> for String {
    fn from(gam: &Gamma) -> String {
        format!("Gamma(alpha={:.5}, beta={:.5})", gam.shape, gam.scale)
    }
}

impl_display!(Gamma);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for Gamma {
            fn ln_f(&self, x: &$kind) -> f64 {
                let xf = f64::from(*x);
                (self.shape - 1.0).mul_add(xf.ln(), -xf / self.scale)
                    - self.shape.mul_add(self.ln_scale(), self.ln_gamma_shape())
            }
        }

        impl Sampleable<$kind> for Gamma {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let g = rand_distr::Gamma::new(self.shape, self.scale).unwrap();
                rng.sample(g) as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let g = rand_distr::Gamma::new(self.shape, self.scale).unwrap();
                (0..n).map(|_| rng.sample(g) as $kind).collect()
            }
        }

        impl ContinuousDistr<$kind> for Gamma {}

        impl Support<$kind> for Gamma {
            fn supports(&self, x: &$kind) -> bool {
                x.is_finite() && *x > 0.0
            }
        }

        impl Cdf<$kind> for Gamma {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for Gamma {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                self.invcdf_f64(p) as $kind
            }
        }

        impl Mean<$kind> for Gamma {
            fn mean(&self) -> Option<$kind> {
                Some((self.shape * self.scale) as $kind)
            }
        }

        impl Median<$kind> for Gamma {
            fn median(&self) -> Option<$kind> {
                Some(self.invcdf_f64(0.5) as $kind)
            }
        }

        impl Mode<$kind> for Gamma {
            fn mode(&self) -> Option<$kind> {
                if self.shape >= 1.0 {
                    let m = (self.shape - 1.0) * self.scale;
                    Some(m as $kind)
                } else {
                    None
                }
            }
        }
    };
}

impl Variance<f64> for Gamma {
    fn variance(&self) -> Option<f64> {
        Some(self.shape * self.scale * self.scale)
    }
}

impl Entropy for Gamma {
    fn entropy(&self) -> f64 {
        self.shape + self.ln_scale()
            + self.ln_gamma_shape()
            + (1.0 - self.shape) * self.shape.digamma()
    }
}

impl Skewness for Gamma {
    fn skewness(&self) -> Option<f64> {
        Some(2.0 / self.shape.sqrt())
    }
}

impl Kurtosis for Gamma {
    fn kurtosis(&self) -> Option<f64> {
        Some(6.0 / self.shape)
    }
}

impl_traits!(f32);
impl_traits!(f64);

impl std::error::Error for GammaError {}

impl fmt::Display for GammaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeTooLow { shape } => {
                write!(f, "shape ({shape}) must be greater than zero")
            }
            Self::ShapeNotFinite { shape } => {
                write!(f, "non-finite shape: {shape}")
            }
            Self::ScaleTooLow { scale } => {
                write!(f, "scale ({scale}) must be greater than zero")
            }
            Self::ScaleNotFinite { scale } => {
                write!(f, "non-finite scale: {scale}")
            }
        }
    }
}
