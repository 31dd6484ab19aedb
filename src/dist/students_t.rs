//! Student's t distribution over x in (-∞, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::ln_gammafn;
use crate::traits::*;
use rand::Rng;
use special::Beta as _;
use special::Gamma as _;
use std::f64::consts::PI;
use std::fmt;

/// [Student's t distribution](https://en.wikipedia.org/wiki/Student%27s_t-distribution)
/// over x in (-∞, ∞) with ν degrees of freedom.
///
/// # Example
///
/// ```
/// use distcan::prelude::*;
///
/// let t = StudentsT::new(2.0).unwrap();
/// assert_eq!(t.to_string(), "T(df=2.00000)");
///
/// // for ν = 2 the cdf is 1/2 + x / (2 sqrt(2 + x²))
/// let x = 1.5_f64;
/// let cdf = 0.5 + x / (2.0 * (2.0 + x * x).sqrt());
/// assert!((t.cdf(&x) - cdf).abs() < 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct StudentsT {
    /// Degrees of freedom, ν, in (0, ∞)
    df: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum StudentsTError {
    /// The df parameter is infinite or NaN
    DfNotFinite { df: f64 },
    /// The df parameter is less than or equal to zero
    DfTooLow { df: f64 },
}

impl StudentsT {
    /// Create a new Student's t distribution with degrees of freedom, df.
    #[inline]
    pub fn new(df: f64) -> Result<Self, StudentsTError> {
        if !df.is_finite() {
            Err(StudentsTError::DfNotFinite { df })
        } else if df <= 0.0 {
            Err(StudentsTError::DfTooLow { df })
        } else {
            Ok(StudentsT { df })
        }
    }

    /// Creates a new StudentsT without checking whether the parameter is
    /// valid.
    #[inline]
    pub fn new_unchecked(df: f64) -> Self {
        StudentsT { df }
    }

    /// Get the degrees of freedom, ν
    #[inline]
    pub fn df(&self) -> f64 {
        self.df
    }

    // I_z(ν/2, 1/2) with z = ν / (ν + x²), which is P(|T| > |x|)
    fn two_tailed(&self, x: f64) -> f64 {
        let a = self.df / 2.0;
        let z = self.df / x.mul_add(x, self.df);
        z.inc_beta(a, 0.5, a.ln_beta(0.5))
    }

    fn cdf_f64(&self, x: f64) -> f64 {
        let tail = 0.5 * self.two_tailed(x);
        if x > 0.0 {
            1.0 - tail
        } else {
            tail
        }
    }

    fn invcdf_f64(&self, p: f64) -> f64 {
        if p <= 0.0 {
            return f64::NEG_INFINITY;
        } else if p >= 1.0 {
            return f64::INFINITY;
        } else if p == 0.5 {
            return 0.0;
        }

        let a = self.df / 2.0;
        let tail = 2.0 * p.min(1.0 - p);
        let z = tail.inv_inc_beta(a, 0.5, a.ln_beta(0.5));
        let x = (self.df * (1.0 - z) / z).sqrt();
        if p < 0.5 {
            -x
        } else {
            x
        }
    }
}

impl Default for StudentsT {
    fn default() -> Self {
        StudentsT { df: 2.0 }
    }
}

impl Parameterized for StudentsT {
    type Parameters = f64;

    fn emit_params(&self) -> Self::Parameters {
        self.df
    }

    fn from_params(df: Self::Parameters) -> Self {
        Self::new_unchecked(df)
    }
}

impl From<&StudentsT> for String {
    fn from(t: &StudentsT) -> String {
        format!("T(df={:.5})", t.df)
    }
}

impl_display!(StudentsT);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for StudentsT {
            fn ln_f(&self, x: &$kind) -> f64 {
                let vp1 = (self.df + 1.0) / 2.0;
                let xf = f64::from(*x);
                let xterm = -vp1 * (xf * xf / self.df).ln_1p();
                let zterm = 0.5_f64.mul_add(
                    -(self.df * PI).ln(),
                    ln_gammafn(vp1) - ln_gammafn(self.df / 2.0),
                );
                zterm + xterm
            }
        }

        impl Sampleable<$kind> for StudentsT {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                let t = rand_distr::StudentT::new(self.df).unwrap();
                rng.sample(t) as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let t = rand_distr::StudentT::new(self.df).unwrap();
                (0..n).map(|_| rng.sample(t) as $kind).collect()
            }
        }

        impl Support<$kind> for StudentsT {
            fn supports(&self, x: &$kind) -> bool {
                x.is_finite()
            }
        }

        impl ContinuousDistr<$kind> for StudentsT {}

        impl Cdf<$kind> for StudentsT {
            fn cdf(&self, x: &$kind) -> f64 {
                self.cdf_f64(f64::from(*x))
            }
        }

        impl InverseCdf<$kind> for StudentsT {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                self.invcdf_f64(p) as $kind
            }
        }

        impl Mean<$kind> for StudentsT {
            fn mean(&self) -> Option<$kind> {
                if self.df > 1.0 {
                    Some(0.0)
                } else {
                    None
                }
            }
        }

        impl Median<$kind> for StudentsT {
            fn median(&self) -> Option<$kind> {
                Some(0.0)
            }
        }

        impl Mode<$kind> for StudentsT {
            fn mode(&self) -> Option<$kind> {
                Some(0.0)
            }
        }
    };
}

impl Variance<f64> for StudentsT {
    fn variance(&self) -> Option<f64> {
        if self.df > 2.0 {
            Some(self.df / (self.df - 2.0))
        } else if self.df > 1.0 {
            Some(f64::INFINITY)
        } else {
            None
        }
    }
}

impl Entropy for StudentsT {
    fn entropy(&self) -> f64 {
        let half_df = self.df / 2.0;
        let vp1 = (self.df + 1.0) / 2.0;
        vp1 * (vp1.digamma() - half_df.digamma())
            + 0.5_f64.mul_add(self.df.ln(), half_df.ln_beta(0.5))
    }
}

impl Skewness for StudentsT {
    fn skewness(&self) -> Option<f64> {
        if self.df > 3.0 {
            Some(0.0)
        } else {
            None
        }
    }
}

impl Kurtosis for StudentsT {
    fn kurtosis(&self) -> Option<f64> {
        if self.df > 4.0 {
            Some(6.0 / (self.df - 4.0))
        } else if self.df > 2.0 {
            Some(f64::INFINITY)
        } else {
            None
        }
    }
}

impl_traits!(f64);
impl_traits!(f32);

impl std::error::Error for StudentsTError {}

impl fmt::Display for StudentsTError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DfNotFinite { df } => write!(f, "non-finite df: {}", df),
            Self::DfTooLow { df } => {
                write!(f, "df ({}) must be greater than zero", df)
            }
        }
    }
}
