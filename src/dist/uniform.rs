//! Continuous uniform distribution on a closed interval
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use std::fmt;

use crate::impl_display;
use crate::traits::*;

/// [Continuous uniform distribution](https://en.wikipedia.org/wiki/Uniform_distribution_(continuous)),
/// U(a, b), with constant density on the closed interval [a, b].
///
/// # Example
///
/// A flat prior over a bounded location
///
/// ```
/// use distcan::prelude::*;
///
/// let u = Uniform::new(-1.5, 2.5).unwrap();
///
/// // both bounds belong to the support
/// assert_eq!(u.pdf(&-1.5_f64), 0.25);
/// assert_eq!(u.pdf(&2.5_f64), 0.25);
/// assert_eq!(u.pdf(&2.6_f64), 0.0);
///
/// // the central half of the mass
/// let (lo, hi): (f64, f64) = u.interval(0.5);
/// assert!((lo + 0.5).abs() < 1E-12 && (hi - 1.5).abs() < 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(try_from = "UniformParameters", into = "UniformParameters"))]
pub struct Uniform {
    a: f64,
    b: f64,
}

/// Serialized form of [`Uniform`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct UniformParameters {
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum UniformError {
    /// a is infinite or NaN
    ANotFinite { a: f64 },
    /// b is infinite or NaN
    BNotFinite { b: f64 },
    /// a is not strictly below b
    InvalidInterval { a: f64, b: f64 },
}

impl Uniform {
    /// Uniform on [`a`, `b`]; both bounds must be finite with `a < b`
    #[inline]
    pub fn new(a: f64, b: f64) -> Result<Self, UniformError> {
        if !a.is_finite() {
            Err(UniformError::ANotFinite { a })
        } else if !b.is_finite() {
            Err(UniformError::BNotFinite { b })
        } else if a >= b {
            Err(UniformError::InvalidInterval { a, b })
        } else {
            Ok(Uniform::new_unchecked(a, b))
        }
    }

    #[inline]
    pub fn new_unchecked(a: f64, b: f64) -> Self {
        Uniform { a, b }
    }

    /// Lower bound
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Upper bound
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// `(a, b)`
    ///
    /// ```
    /// # use distcan::dist::Uniform;
    /// let u = Uniform::new(-1.5, 2.5).unwrap();
    /// assert_eq!(u.params(), (-1.5, 2.5));
    /// ```
    #[inline]
    pub fn params(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    /// Length of the interval, b - a
    #[inline]
    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    #[inline]
    fn midpoint(&self) -> f64 {
        0.5_f64.mul_add(self.width(), self.a)
    }

    #[inline]
    fn contains(&self, x: f64) -> bool {
        (self.a..=self.b).contains(&x)
    }
}

impl Default for Uniform {
    fn default() -> Self {
        Uniform::new_unchecked(0.0, 1.0)
    }
}

impl Parameterized for Uniform {
    type Parameters = (f64, f64);

    fn emit_params(&self) -> Self::Parameters {
        self.params()
    }

    fn from_params((a, b): Self::Parameters) -> Self {
        Self::new_unchecked(a, b)
    }
}

impl TryFrom<UniformParameters> for Uniform {
    type Error = UniformError;

    fn try_from(params: UniformParameters) -> Result<Self, Self::Error> {
        Uniform::new(params.a, params.b)
    }
}

impl From<Uniform> for UniformParameters {
    fn from(u: Uniform) -> Self {
        UniformParameters { a: u.a, b: u.b }
    }
}

impl From<&Uniform> for String {
    fn from(u: &Uniform) -> String {
        format!("Uniform(a={:.5}, b={:.5})", u.a, u.b)
    }
}

impl_display!(Uniform);

macro_rules! impl_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for Uniform {
            fn f(&self, x: &$kind) -> f64 {
                if self.contains(f64::from(*x)) {
                    self.width().recip()
                } else {
                    0.0
                }
            }

            fn ln_f(&self, x: &$kind) -> f64 {
                if self.contains(f64::from(*x)) {
                    -self.width().ln()
                } else {
                    f64::NEG_INFINITY
                }
            }
        }

        impl Sampleable<$kind> for Uniform {
            fn draw<R: Rng>(&self, rng: &mut R) -> $kind {
                rng.gen_range(self.a..=self.b) as $kind
            }

            fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<$kind> {
                let u = rand_distr::Uniform::new_inclusive(self.a, self.b);
                rng.sample_iter(u).take(n).map(|x| x as $kind).collect()
            }
        }

        impl Support<$kind> for Uniform {
            fn supports(&self, x: &$kind) -> bool {
                self.contains(f64::from(*x))
            }
        }

        impl ContinuousDistr<$kind> for Uniform {}

        impl Cdf<$kind> for Uniform {
            fn cdf(&self, x: &$kind) -> f64 {
                ((f64::from(*x) - self.a) / self.width()).clamp(0.0, 1.0)
            }
        }

        impl InverseCdf<$kind> for Uniform {
            fn invcdf(&self, p: f64) -> $kind {
                assert!((0.0..=1.0).contains(&p), "P out of range");
                p.mul_add(self.width(), self.a) as $kind
            }
        }

        impl Mean<$kind> for Uniform {
            fn mean(&self) -> Option<$kind> {
                Some(self.midpoint() as $kind)
            }
        }

        impl Median<$kind> for Uniform {
            fn median(&self) -> Option<$kind> {
                Some(self.midpoint() as $kind)
            }
        }

        // no unique mode
        impl Mode<$kind> for Uniform {
            fn mode(&self) -> Option<$kind> {
                None
            }
        }
    };
}

impl_traits!(f64);
impl_traits!(f32);

impl Variance<f64> for Uniform {
    fn variance(&self) -> Option<f64> {
        Some(self.width().powi(2) / 12.0)
    }
}

impl Entropy for Uniform {
    fn entropy(&self) -> f64 {
        self.width().ln()
    }
}

impl Skewness for Uniform {
    fn skewness(&self) -> Option<f64> {
        Some(0.0)
    }
}

impl Kurtosis for Uniform {
    fn kurtosis(&self) -> Option<f64> {
        Some(-1.2)
    }
}

impl std::error::Error for UniformError {}

impl fmt::Display for UniformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ANotFinite { a } => {
                write!(f, "lower bound must be finite, got {}", a)
            }
            Self::BNotFinite { b } => {
                write!(f, "upper bound must be finite, got {}", b)
            }
            Self::InvalidInterval { a, b } => write!(
                f,
                "lower bound must be below upper bound, got [{}, {}]",
                a, b
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::ks_test;
    use crate::test_basic_impls;

    const TOL: f64 = 1E-12;

    test_basic_impls!([continuous] Uniform::new(-1.5, 2.5).unwrap());

    fn unif() -> Uniform {
        Uniform::new(-1.5, 2.5).unwrap()
    }

    #[test]
    fn validation_order() {
        // finiteness is reported before the interval check
        assert_eq!(
            Uniform::new(f64::INFINITY, 0.0),
            Err(UniformError::ANotFinite { a: f64::INFINITY })
        );
        assert!(matches!(
            Uniform::new(3.0, f64::NAN),
            Err(UniformError::BNotFinite { .. })
        ));
        assert_eq!(
            Uniform::new(1.0, 1.0).map_err(|e| e.to_string()),
            Err(String::from(
                "lower bound must be below upper bound, got [1, 1]"
            ))
        );
        assert_eq!(
            Uniform::new(2.0, -2.0),
            Err(UniformError::InvalidInterval { a: 2.0, b: -2.0 })
        );
    }

    #[test]
    fn params_and_display() {
        let u = unif();
        assert_eq!(u.emit_params(), (-1.5, 2.5));
        assert_eq!(Uniform::from_params(u.params()), u);
        assert_eq!(u.width(), 4.0);
        assert_eq!(u.to_string(), "Uniform(a=-1.50000, b=2.50000)");
        assert_eq!(Uniform::default().params(), (0.0, 1.0));
    }

    #[test]
    fn density_is_flat_on_closed_interval() {
        let u = unif();
        for &x in &[-1.5_f64, -0.2, 0.0, 1.7, 2.5] {
            assert_eq!(u.pdf(&x), 0.25);
            assert::close(u.ln_pdf(&x), -(4.0_f64).ln(), TOL);
        }
        assert_eq!(u.pdf(&-1.500_001_f64), 0.0);
        assert_eq!(u.ln_pdf(&2.500_001_f64), f64::NEG_INFINITY);
        assert!(u.supports(&-1.5_f32));
        assert!(!u.supports(&f64::NAN));
    }

    #[test]
    fn cdf_and_quantiles() {
        let u = unif();
        assert_eq!(u.cdf(&-3.0_f64), 0.0);
        assert::close(u.cdf(&0.0_f64), 0.375, TOL);
        assert::close(u.cdf(&1.7_f64), 0.8, TOL);
        assert_eq!(u.cdf(&9.0_f64), 1.0);
        assert_eq!(u.sf(&9.0_f64), 0.0);

        let q: f64 = u.quantile(0.9);
        assert::close(q, 2.1, TOL);
        let q: f32 = u.quantile(0.0);
        assert_eq!(q, -1.5);
    }

    #[test]
    #[should_panic]
    fn invcdf_rejects_p_above_one() {
        let _x: f64 = unif().invcdf(1.01);
    }

    #[test]
    fn summaries() {
        let u = unif();
        let mean: f64 = u.mean().unwrap();
        let median: f64 = u.median().unwrap();
        let mode: Option<f64> = u.mode();
        assert_eq!(mean, 0.5);
        assert_eq!(median, 0.5);
        assert!(mode.is_none());
        assert::close(u.variance().unwrap(), 4.0 / 3.0, TOL);
        assert::close(u.entropy(), 2.0 * std::f64::consts::LN_2, TOL);
        assert_eq!(u.skewness(), Some(0.0));
        assert_eq!(u.is_platykurtic(), Some(true));
    }

    #[test]
    fn draws_stay_inside_and_pass_ks() {
        let mut rng = rand::thread_rng();
        let u = unif();
        let cdf = |x: f64| u.cdf(&x);

        let passes = (0..5).fold(0, |acc, _| {
            let xs: Vec<f64> = u.sample(1000, &mut rng);
            assert!(xs.iter().all(|x| u.supports(x)));
            let (_, p) = ks_test(&xs, cdf);
            if p > 0.2 {
                acc + 1
            } else {
                acc
            }
        });
        assert!(passes > 0);
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn serde_validates_bounds() {
        let json = serde_json::to_string(&unif()).unwrap();
        assert_eq!(json, r#"{"a":-1.5,"b":2.5}"#);
        let back: Uniform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unif());
        assert!(serde_json::from_str::<Uniform>(r#"{"a":3.0,"b":1.0}"#).is_err());
    }
}
