//! Inverse Gamma distribution over x in (0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use special::Gamma as _;
use std::fmt;

use crate::impl_display;
use crate::misc::ln_gammafn;
use crate::misc::root_finding::invert_cdf;
use crate::traits::*;

/// [Inverse gamma distribution](https://en.wikipedia.org/wiki/Inverse-gamma_distribution)
/// IG(α, β) over x in (0, ∞).
///
/// ```math
///             β^α
/// f(x|α, β) = ----  x^(-α-1) e^(-β/x)
///             Γ(α)
/// ```
///
/// If X ~ Gamma(α, 1/β) then 1/X ~ IG(α, β).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct InvGamma {
    // shape parameter, α
    shape: f64,
    // scale parameter, β
    scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum InvGammaError {
    /// Shape parameter is less than or equal to zero
    ShapeTooLow { shape: f64 },
    /// Shape parameter is infinite or NaN
    ShapeNotFinite { shape: f64 },
    /// Scale parameter is less than or equal to zero
    ScaleTooLow { scale: f64 },
    /// Scale parameter is infinite or NaN
    ScaleNotFinite { scale: f64 },
}

impl InvGamma {
    /// Create a new `InvGamma` distribution with shape (α) and scale (β).
    pub fn new(shape: f64, scale: f64) -> Result<Self, InvGammaError> {
        if !shape.is_finite() {
            Err(InvGammaError::ShapeNotFinite { shape })
        } else if !scale.is_finite() {
            Err(InvGammaError::ScaleNotFinite { scale })
        } else if shape <= 0.0 {
            Err(InvGammaError::ShapeTooLow { shape })
        } else if scale <= 0.0 {
            Err(InvGammaError::ScaleTooLow { scale })
        } else {
            Ok(InvGamma { shape, scale })
        }
    }

    /// Creates a new InvGamma without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(shape: f64, scale: f64) -> Self {
        InvGamma { shape, scale }
    }

    /// Get the shape parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// # use distcan::dist::InvGamma;
    /// let ig = InvGamma::new(1.0, 2.0).unwrap();
    /// assert_eq!(ig.shape(), 1.0);
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
    /// # use distcan::dist::InvGamma;
    /// let ig = InvGamma::new(1.0, 2.0).unwrap();
    /// assert_eq!(ig.scale(), 2.0);
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
}

impl Default for InvGamma {
    fn default() -> Self {
        InvGamma::new_unchecked(1.0, 1.0)
    }
}

impl Parameterized for InvGamma {
    type Parameters = (f64, f64);

    fn emit_params(&self) -> Self::Parameters {
        self.params()
    }

    fn from_params((shape, scale): Self::Parameters) -> Self {
        Self::new_unchecked(shape, scale)
    }
}

impl From<&InvGamma> for String {
    fn from(ig: &InvGamma) -> String {
        format!("InverseGamma(alpha={:.5}, beta={:.5})", ig.shape, ig.scale)
    }
}

impl_display!(InvGamma);

impl InvGamma {
    fn cdf_f64(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            1.0 - (self.scale / x).inc_gamma(self.shape)
        }
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        let x0 = self.scale / (self.shape + 1.0);
        invert_cdf(
            p,
            x0,
            (0.0, f64::INFINITY),
            |x| self.cdf_f64(x),
            |x| self.f(&x),
        )
    }
}

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for InvGamma {
            fn ln_f(&self, x: &$kind) -> f64 {
                let xf = f64::from(*x);
                self.shape.mul_add(self.scale.ln(), -ln_gammafn(self.shape))
                    - (self.shape + 1.0).mul_add(xf.ln(), self.scale / xf)
            }
        }

        impl Sampleable<$kind> for InvGamma {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let g = rand_distr::Gamma::new(self.shape, self.scale.recip())
                    .unwrap();
                rng.sample(g).recip() as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let g = rand_distr::Gamma::new(self.shape, self.scale.recip())
                    .unwrap();
                (0..n).map(|_| rng.sample(g).recip() as $kind).collect()
            }
        }

        impl ContinuousDistr<$kind> for InvGamma {}

        impl Support<$kind> for InvGamma {
            fn supports(&self, x: &$kind) -> bool {
                x.is_finite() && *x > 0.0
            }
        }

        impl Cdf<$kind> for InvGamma {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for InvGamma {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                self.invcdf_f64(p) as $kind
            }
        }

        impl Mean<$kind> for InvGamma {
            fn mean(&self) -> Option<$kind> {
                if self.shape > 1.0 {
                    Some((self.scale / (self.shape - 1.0)) as $kind)
                } else {
                    None
                }
            }
        }

        impl Median<$kind> for InvGamma {
            fn median(&self) -> Option<$kind> {
                Some(self.invcdf_f64(0.5) as $kind)
            }
        }

        impl Mode<$kind> for InvGamma {
            fn mode(&self) -> Option<$kind> {
                Some((self.scale / (self.shape + 1.0)) as $kind)
            }
        }
    };
}

impl Variance<f64> for InvGamma {
    fn variance(&self) -> Option<f64> {
        if self.shape > 2.0 {
            let numer = self.scale * self.scale;
            let shape_m1 = self.shape - 1.0;
            let denom = shape_m1 * shape_m1 * (self.shape - 2.0);
            Some(numer / denom)
        } else {
            None
        }
    }
}

impl Entropy for InvGamma {
    fn entropy(&self) -> f64 {
        self.shape + self.scale.ln() + ln_gammafn(self.shape)
            - (1.0 + self.shape) * self.shape.digamma()
    }
}

impl Skewness for InvGamma {
    fn skewness(&self) -> Option<f64> {
        if self.shape > 3.0 {
            Some(4.0 * (self.shape - 2.0).sqrt() / (self.shape - 3.0))
        } else {
            None
        }
    }
}

impl Kurtosis for InvGamma {
    fn kurtosis(&self) -> Option<f64> {
        if self.shape > 4.0 {
            let krt = 30.0_f64.mul_add(self.shape, -66.0)
                / ((self.shape - 3.0) * (self.shape - 4.0));
            Some(krt)
        } else {
            None
        }
    }
}

impl_traits!(f32);
impl_traits!(f64);

impl std::error::Error for InvGammaError {}

impl fmt::Display for InvGammaError {
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
