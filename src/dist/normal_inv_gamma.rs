//! Normal Inverse Gamma distribution over (μ, σ²) pairs
//!
//! The common conjugate prior for a Gaussian with unknown mean and variance.
//! For a reference see section 6 of [Kevin Murphy's
//! whitepaper](https://www.cs.ubc.ca/~murphyk/Papers/bayesGauss.pdf).
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

mod broadcast;
mod gaussian_prior;

pub use broadcast::{Broadcast, BroadcastError};

use log::trace;
use rand::Rng;
use std::f64::consts::PI;
use std::fmt;
use std::sync::OnceLock;

use crate::consts::LN_2PI;
use crate::dist::{Gaussian, InvGamma};
use crate::impl_display;
use crate::misc::{gammafn, ln_gammafn};
use crate::traits::*;

/// [Normal Inverse Gamma distribution](https://en.wikipedia.org/wiki/Normal-inverse-gamma_distribution)
/// NIG(μ, V, α, β) over a location, m, and a variance, s.
///
/// The generative process is
///
/// ```math
/// s ~ InvGamma(α, β)
/// m | s ~ N(μ, sqrt(s V))
/// ```
///
/// # Example
///
/// ```
/// use distcan::prelude::*;
///
/// let nig = NormalInverseGamma::new(0.0, 1.0, 5.0, 6.0).unwrap();
///
/// assert_eq!(nig.mode(), Some((0.0, 1.0)));
/// assert_eq!(nig.mean(), Some((0.0, 1.5)));
///
/// let f = nig.pdf(&(1.0, 3.0));
/// assert!((f - 0.011_727_232_702_125_35).abs() < 1E-14);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde1",
    serde(try_from = "NormalInverseGammaParameters")
)]
#[cfg_attr(feature = "serde1", serde(into = "NormalInverseGammaParameters"))]
pub struct NormalInverseGamma {
    mu: f64,
    v0: f64,
    shape: f64,
    scale: f64,
    // β^α / Γ(α) / sqrt(2πV)
    zinv: OnceLock<f64>,
    // α ln β - lnΓ(α) - ½(ln V + ln 2π)
    ln_zinv: OnceLock<f64>,
}

impl PartialEq for NormalInverseGamma {
    fn eq(&self, other: &NormalInverseGamma) -> bool {
        self.mu == other.mu
            && self.v0 == other.v0
            && self.shape == other.shape
            && self.scale == other.scale
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct NormalInverseGammaParameters {
    pub mu: f64,
    pub v0: f64,
    pub shape: f64,
    pub scale: f64,
}

impl TryFrom<NormalInverseGammaParameters> for NormalInverseGamma {
    type Error = NormalInverseGammaError;

    fn try_from(
        params: NormalInverseGammaParameters,
    ) -> Result<Self, Self::Error> {
        NormalInverseGamma::new(
            params.mu,
            params.v0,
            params.shape,
            params.scale,
        )
    }
}

impl From<NormalInverseGamma> for NormalInverseGammaParameters {
    fn from(nig: NormalInverseGamma) -> Self {
        nig.emit_params()
    }
}

impl Parameterized for NormalInverseGamma {
    type Parameters = NormalInverseGammaParameters;

    fn emit_params(&self) -> Self::Parameters {
        NormalInverseGammaParameters {
            mu: self.mu,
            v0: self.v0,
            shape: self.shape,
            scale: self.scale,
        }
    }

    fn from_params(params: Self::Parameters) -> Self {
        Self::new_unchecked(params.mu, params.v0, params.shape, params.scale)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum NormalInverseGammaError {
    /// The mu parameter is infinite or NaN
    MuNotFinite { mu: f64 },
    /// The v0 parameter is less than or equal to zero
    V0TooLow { v0: f64 },
    /// The v0 parameter is infinite or NaN
    V0NotFinite { v0: f64 },
    /// The shape parameter is less than or equal to zero
    ShapeTooLow { shape: f64 },
    /// The shape parameter is infinite or NaN
    ShapeNotFinite { shape: f64 },
    /// The scale parameter is less than or equal to zero
    ScaleTooLow { scale: f64 },
    /// The scale parameter is infinite or NaN
    ScaleNotFinite { scale: f64 },
}

impl NormalInverseGamma {
    /// Create a new Normal Inverse Gamma distribution
    ///
    /// # Arguments
    /// - mu: The prior mean of the location
    /// - v0: Variance of the location relative to the variance of the data
    /// - shape: Shape of the inverse gamma over the variance
    /// - scale: Scale of the inverse gamma over the variance
    ///
    /// # Example
    ///
    /// ```rust
    /// use distcan::dist::{NormalInverseGamma, NormalInverseGammaError};
    ///
    /// assert!(NormalInverseGamma::new(0.0, 1.0, 5.0, 6.0).is_ok());
    /// assert_eq!(
    ///     NormalInverseGamma::new(0.0, 1.0, 0.0, 6.0),
    ///     Err(NormalInverseGammaError::ShapeTooLow { shape: 0.0 }),
    /// );
    /// ```
    pub fn new(
        mu: f64,
        v0: f64,
        shape: f64,
        scale: f64,
    ) -> Result<Self, NormalInverseGammaError> {
        if !mu.is_finite() {
            Err(NormalInverseGammaError::MuNotFinite { mu })
        } else if !v0.is_finite() {
            Err(NormalInverseGammaError::V0NotFinite { v0 })
        } else if !shape.is_finite() {
            Err(NormalInverseGammaError::ShapeNotFinite { shape })
        } else if !scale.is_finite() {
            Err(NormalInverseGammaError::ScaleNotFinite { scale })
        } else if v0 <= 0.0 {
            Err(NormalInverseGammaError::V0TooLow { v0 })
        } else if shape <= 0.0 {
            Err(NormalInverseGammaError::ShapeTooLow { shape })
        } else if scale <= 0.0 {
            Err(NormalInverseGammaError::ScaleTooLow { scale })
        } else {
            Ok(NormalInverseGamma::new_unchecked(mu, v0, shape, scale))
        }
    }

    /// Creates a new NormalInverseGamma without checking whether the
    /// parameters are valid. Densities of invalid parameters follow IEEE-754
    /// arithmetic.
    #[inline]
    pub fn new_unchecked(mu: f64, v0: f64, shape: f64, scale: f64) -> Self {
        NormalInverseGamma {
            mu,
            v0,
            shape,
            scale,
            zinv: OnceLock::new(),
            ln_zinv: OnceLock::new(),
        }
    }

    /// Returns `(mu, v0, shape, scale)`
    #[inline]
    pub fn params(&self) -> (f64, f64, f64, f64) {
        (self.mu, self.v0, self.shape, self.scale)
    }

    /// Get the mu parameter
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Get the v0 parameter
    #[inline]
    pub fn v0(&self) -> f64 {
        self.v0
    }

    /// Get the shape parameter
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Get the scale parameter
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    fn zinv(&self) -> f64 {
        *self.zinv.get_or_init(|| {
            self.scale.powf(self.shape)
                / gammafn(self.shape)
                / (self.v0 * 2.0 * PI).sqrt()
        })
    }

    #[inline]
    fn ln_zinv(&self) -> f64 {
        *self.ln_zinv.get_or_init(|| {
            self.shape.mul_add(self.scale.ln(), -ln_gammafn(self.shape))
                - 0.5 * (self.v0.ln() + LN_2PI)
        })
    }
}

impl From<&NormalInverseGamma> for String {
    fn from(nig: &NormalInverseGamma) -> String {
        format!(
            "NormalInverseGamma(mu={:.5}, v0={:.5}, shape={:.5}, scale={:.5})",
            nig.mu, nig.v0, nig.shape, nig.scale
        )
    }
}

impl_display!(NormalInverseGamma);

impl HasDensity<(f64, f64)> for NormalInverseGamma {
    fn f(&self, x: &(f64, f64)) -> f64 {
        let (x, sig2) = *x;
        let d = x - self.mu;
        self.zinv() * (sig2.sqrt() * sig2.powf(self.shape + 1.0)).recip()
            * (-self.scale / sig2 - d * d / (2.0 * sig2 * self.v0)).exp()
    }

    fn ln_f(&self, x: &(f64, f64)) -> f64 {
        let (x, sig2) = *x;
        let ln_sig2 = sig2.ln();
        let d = x - self.mu;
        self.ln_zinv()
            - 0.5 * ln_sig2
            - (self.shape + 1.0) * ln_sig2
            - self.scale / sig2
            - d * d / (2.0 * sig2 * self.v0)
    }
}

impl Sampleable<(f64, f64)> for NormalInverseGamma {
    /// Draw `(m, s)`.
    ///
    /// # Panics
    ///
    /// If the distribution was built with `new_unchecked` from parameters the
    /// samplers reject.
    fn draw<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        let mut sig2: f64 =
            InvGamma::new_unchecked(self.shape, self.scale).draw(rng);
        if sig2 <= 0.0 {
            trace!("clamping sampled variance {} to machine epsilon", sig2);
            sig2 = f64::EPSILON;
        }
        let m: f64 =
            Gaussian::new_unchecked(self.mu, (sig2 * self.v0).sqrt()).draw(rng);
        (m, sig2)
    }
}

impl Support<(f64, f64)> for NormalInverseGamma {
    fn supports(&self, x: &(f64, f64)) -> bool {
        let (m, sig2) = *x;
        m.is_finite() && sig2.is_finite() && sig2 > 0.0
    }
}

impl ContinuousDistr<(f64, f64)> for NormalInverseGamma {}

impl Mode<(f64, f64)> for NormalInverseGamma {
    /// `(μ, β / (α + 1))`; the variance component is the mode of the
    /// inverse gamma over the variance.
    fn mode(&self) -> Option<(f64, f64)> {
        Some((self.mu, self.scale / (self.shape + 1.0)))
    }
}

impl Mean<(f64, f64)> for NormalInverseGamma {
    /// The variance component is infinite when `shape <= 1`
    fn mean(&self) -> Option<(f64, f64)> {
        let sig2 = if self.shape > 1.0 {
            self.scale / (self.shape - 1.0)
        } else {
            f64::INFINITY
        };
        Some((self.mu, sig2))
    }
}

impl std::error::Error for NormalInverseGammaError {}

impl fmt::Display for NormalInverseGammaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuNotFinite { mu } => write!(f, "non-finite mu: {}", mu),
            Self::V0TooLow { v0 } => {
                write!(f, "v0 ({}) must be greater than zero", v0)
            }
            Self::V0NotFinite { v0 } => write!(f, "non-finite v0: {}", v0),
            Self::ShapeTooLow { shape } => {
                write!(f, "shape ({}) must be greater than zero", shape)
            }
            Self::ShapeNotFinite { shape } => {
                write!(f, "non-finite shape: {}", shape)
            }
            Self::ScaleTooLow { scale } => {
                write!(f, "scale ({}) must be greater than zero", scale)
            }
            Self::ScaleNotFinite { scale } => {
                write!(f, "non-finite scale: {}", scale)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;
    use peroxide::numerical::integral::{
        gauss_kronrod_quadrature, Integral,
    };
    use proptest::prelude::*;
    use rand::SeedableRng;

    const TOL: f64 = 1E-12;

    test_basic_impls!(NormalInverseGamma::new(0.0, 1.0, 5.0, 6.0).unwrap());

    fn nig() -> NormalInverseGamma {
        NormalInverseGamma::new(0.0, 1.0, 5.0, 6.0).unwrap()
    }

    #[test]
    fn new_stores_params_verbatim() {
        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        assert_eq!(nig.params(), (1.2, 0.5, 2.3, 3.4));
        assert_eq!(nig.mu(), 1.2);
        assert_eq!(nig.v0(), 0.5);
        assert_eq!(nig.shape(), 2.3);
        assert_eq!(nig.scale(), 3.4);
    }

    #[test]
    fn new_should_reject_bad_params() {
        use NormalInverseGammaError as E;

        assert!(matches!(
            NormalInverseGamma::new(f64::NAN, 1.0, 1.0, 1.0),
            Err(E::MuNotFinite { .. })
        ));
        assert_eq!(
            NormalInverseGamma::new(0.0, 0.0, 1.0, 1.0),
            Err(E::V0TooLow { v0: 0.0 })
        );
        assert_eq!(
            NormalInverseGamma::new(0.0, f64::INFINITY, 1.0, 1.0),
            Err(E::V0NotFinite { v0: f64::INFINITY })
        );
        assert_eq!(
            NormalInverseGamma::new(0.0, 1.0, -1.0, 1.0),
            Err(E::ShapeTooLow { shape: -1.0 })
        );
        assert_eq!(
            NormalInverseGamma::new(0.0, 1.0, f64::INFINITY, 1.0),
            Err(E::ShapeNotFinite {
                shape: f64::INFINITY
            })
        );
        assert_eq!(
            NormalInverseGamma::new(0.0, 1.0, 1.0, 0.0),
            Err(E::ScaleTooLow { scale: 0.0 })
        );
        assert_eq!(
            NormalInverseGamma::new(0.0, 1.0, 1.0, f64::NEG_INFINITY),
            Err(E::ScaleNotFinite {
                scale: f64::NEG_INFINITY
            })
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            nig().to_string(),
            "NormalInverseGamma(mu=0.00000, v0=1.00000, shape=5.00000, scale=6.00000)"
        );
    }

    #[test]
    fn pdf_golden_value() {
        assert::close(nig().pdf(&(1.0, 3.0)), 0.011_727_232_702_125_35, 1E-14);
        assert::close(nig().pdf(&(0.0, 1.0)), 0.320_396_810_874_610_6, TOL);
    }

    #[test]
    fn ln_pdf_values() {
        assert::close(nig().ln_pdf(&(1.0, 3.0)), -4.445_841_560_421_723, TOL);
        assert::close(nig().ln_pdf(&(0.0, 1.0)), -1.138_195_017_412_343_2, TOL);

        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        assert::close(nig.pdf(&(0.5, 1.1)), 0.163_586_524_829_518_94, TOL);
        assert::close(nig.ln_pdf(&(0.5, 1.1)), -1.810_413_224_773_535, TOL);
        assert::close(nig.ln_pdf(&(-2.0, 0.3)), -38.803_440_915_381_58, 1E-10);
    }

    #[test]
    fn ln_pdf_agrees_with_ln_of_pdf() {
        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        for &x in &[-3.0, -0.4, 0.0, 1.2, 2.7, 8.0] {
            for &sig2 in &[0.05, 0.3, 1.0, 2.5, 10.0] {
                let lnf = nig.ln_pdf(&(x, sig2));
                let f = nig.pdf(&(x, sig2));
                // the linear-space density underflows far in the tails
                if f > f64::MIN_POSITIVE {
                    assert::close(lnf, f.ln(), 1E-9 * lnf.abs().max(1.0));
                } else {
                    assert!(lnf < f64::MIN_POSITIVE.ln());
                }
            }
        }
    }

    #[test]
    fn pdf_normalizer_tracks_v0() {
        let nig = nig();
        let f1 = nig.pdf(&(1.0, 3.0));
        let nig2 = nig.clone();
        assert_eq!(nig2.pdf(&(1.0, 3.0)), f1);

        let other = NormalInverseGamma::new(0.0, 2.0, 5.0, 6.0).unwrap();
        // doubling v0 scales the normalizer by 1/sqrt(2)
        let expected = nig.pdf(&(0.0, 3.0)) * (-1.0_f64 / 12.0).exp();
        assert::close(other.pdf(&(1.0, 3.0)) * 2.0_f64.sqrt(), expected, TOL);
    }

    #[test]
    fn pdf_underflows_where_ln_pdf_stays_finite() {
        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        assert_eq!(nig.pdf(&(8.0, 0.05)), 0.0);
        assert!(nig.ln_pdf(&(8.0, 0.05)).is_finite());
    }

    #[test]
    fn non_positive_variance_is_not_guarded() {
        let nig = nig();
        assert!(nig.ln_pdf(&(0.0, -1.0)).is_nan());
        assert!(nig.ln_pdf(&(0.0, 0.0)).is_nan());
        assert!(!nig.supports(&(0.0, 0.0)));
        assert!(!nig.supports(&(0.0, -1.0)));
        assert!(!nig.supports(&(f64::INFINITY, 1.0)));
        assert!(nig.supports(&(-4.0, 1E-10)));
    }

    #[test]
    fn pdf_integrates_to_one() {
        let nig = nig();
        let nig = &nig;
        let v0 = nig.v0();
        let mu = nig.mu();

        let marginal = move |sig2: f64| {
            let width = 12.0 * (sig2 * v0).sqrt();
            let inner = move |x: f64| nig.pdf(&(x, sig2));
            gauss_kronrod_quadrature(
                inner,
                (mu - width, mu + width),
                Integral::G7K15(1E-10, 100),
            )
        };

        let total = gauss_kronrod_quadrature(
            marginal,
            (1E-8, 100.0),
            Integral::G7K15(1E-8, 100),
        );
        assert::close(total, 1.0, 1E-3);
    }

    #[test]
    fn mode() {
        assert_eq!(nig().mode(), Some((0.0, 1.0)));
        let nig = NormalInverseGamma::new(-2.0, 3.0, 0.5, 3.0).unwrap();
        assert_eq!(nig.mode(), Some((-2.0, 2.0)));
    }

    #[test]
    fn mode_variance_is_inverse_gamma_mode() {
        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        let ig_mode: f64 = InvGamma::new(2.3, 3.4).unwrap().mode().unwrap();
        assert_eq!(nig.mode(), Some((1.2, ig_mode)));
    }

    #[test]
    fn mean() {
        assert_eq!(nig().mean(), Some((0.0, 1.5)));

        let nig = NormalInverseGamma::new(0.3, 1.0, 1.0, 6.0).unwrap();
        assert_eq!(nig.mean(), Some((0.3, f64::INFINITY)));

        let nig = NormalInverseGamma::new(0.3, 1.0, 0.5, 6.0).unwrap();
        assert_eq!(nig.mean(), Some((0.3, f64::INFINITY)));
    }

    #[test]
    fn sample_returns_n_pairs_with_positive_variance() {
        let mut rng = rand::thread_rng();
        let pairs: Vec<(f64, f64)> = nig().sample(1_000, &mut rng);
        assert_eq!(pairs.len(), 1_000);
        assert!(pairs.iter().all(|&(m, s)| m.is_finite() && s > 0.0));

        let none: Vec<(f64, f64)> = nig().sample(0, &mut rng);
        assert!(none.is_empty());
    }

    #[test]
    fn degenerate_variance_draws_are_clamped_to_epsilon() {
        // the gamma draw overflows, so its reciprocal is zero
        let nig = NormalInverseGamma::new(0.0, 1.0, 1E9, 1E-300).unwrap();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        for _ in 0..10 {
            let (m, sig2): (f64, f64) = nig.draw(&mut rng);
            assert_eq!(sig2, f64::EPSILON);
            assert!(m.is_finite());
        }
        let pairs: Vec<(f64, f64)> = nig.sample(10, &mut rng);
        assert!(pairs.iter().all(|&(_, s)| s == f64::EPSILON));
    }

    #[test]
    fn draws_are_in_support() {
        let mut rng = rand::thread_rng();
        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        for _ in 0..100 {
            let x: (f64, f64) = nig.draw(&mut rng);
            assert!(nig.supports(&x));
        }
    }

    #[test]
    fn sampled_variance_mean_is_close_to_mean() {
        let mut rng = rand::thread_rng();
        let nig = NormalInverseGamma::new(1.0, 1.0, 8.0, 7.0).unwrap();
        let n = 20_000;
        let (sum_m, sum_s) =
            Sampleable::<(f64, f64)>::sample_stream(&nig, &mut rng)
                .take(n)
                .fold((0.0, 0.0), |(am, as_), (m, s)| (am + m, as_ + s));
        let (mean_m, mean_s) = nig.mean().unwrap();
        assert::close(sum_m / n as f64, mean_m, 0.05);
        assert::close(sum_s / n as f64, mean_s, 0.05);
    }

    #[test]
    fn params_round_trip() {
        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        let params = nig.emit_params();
        assert_eq!(
            params,
            NormalInverseGammaParameters {
                mu: 1.2,
                v0: 0.5,
                shape: 2.3,
                scale: 3.4
            }
        );
        assert_eq!(NormalInverseGamma::from_params(params), nig);
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn serde_round_trip() {
        let nig = NormalInverseGamma::new(1.2, 0.5, 2.3, 3.4).unwrap();
        let json = serde_json::to_string(&nig).unwrap();
        let nig2: NormalInverseGamma = serde_json::from_str(&json).unwrap();
        assert_eq!(nig, nig2);
        assert::close(nig.ln_pdf(&(0.5, 1.1)), nig2.ln_pdf(&(0.5, 1.1)), TOL);
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn serde_rejects_invalid_params() {
        let json = r#"{"mu":0.0,"v0":-1.0,"shape":1.0,"scale":1.0}"#;
        let res: Result<NormalInverseGamma, _> = serde_json::from_str(json);
        assert!(res.is_err());
    }

    proptest! {
        #[test]
        fn ln_pdf_is_ln_of_pdf(
            mu in -5.0..5.0_f64,
            v0 in 0.1..5.0_f64,
            shape in 0.5..10.0_f64,
            scale in 0.5..10.0_f64,
            x in -5.0..5.0_f64,
            sig2 in 0.1..10.0_f64,
        ) {
            let nig = NormalInverseGamma::new(mu, v0, shape, scale).unwrap();
            let lnf = nig.ln_pdf(&(x, sig2));
            let f = nig.pdf(&(x, sig2));
            prop_assert!(f > 0.0);
            prop_assert!((lnf - f.ln()).abs() <= 1E-9 * lnf.abs().max(1.0));
        }
    }
}
