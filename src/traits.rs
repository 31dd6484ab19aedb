//! Trait definitions
use rand::Rng;

/// A distribution that can be described by its parameters
pub trait Parameterized: Sized {
    type Parameters;

    fn emit_params(&self) -> Self::Parameters;

    fn from_params(params: Self::Parameters) -> Self;

    fn map_params(&self, f: impl Fn(Self::Parameters) -> Self::Parameters) -> Self {
        let params = self.emit_params();
        let new_params = f(params);
        Self::from_params(new_params)
    }
}

/// Density (or mass) function of a random variable
pub trait HasDensity<X> {
    /// Probability function
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::HasDensity;
    ///
    /// let g = Gaussian::standard();
    /// assert!(g.f(&0.0_f64) > g.f(&0.1_f64));
    /// assert!(g.f(&0.0_f64) > g.f(&-0.1_f64));
    /// ```
    fn f(&self, x: &X) -> f64 {
        self.ln_f(x).exp()
    }

    /// Log of the probability function
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::HasDensity;
    ///
    /// let g = Gaussian::standard();
    /// assert!(g.ln_f(&0.0_f64) > g.ln_f(&0.1_f64));
    /// assert!(g.ln_f(&0.0_f64) > g.ln_f(&-0.1_f64));
    /// ```
    fn ln_f(&self, x: &X) -> f64;
}

/// A random variable that can be drawn from using an explicit source of
/// randomness
pub trait Sampleable<X> {
    /// Single draw from the distribution
    ///
    /// # Example
    ///
    /// Draw a Gaussian-distributed value.
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::Sampleable;
    ///
    /// let g = Gaussian::standard();
    /// let mut rng = rand::thread_rng();
    /// let x: f64 = g.draw(&mut rng);
    /// assert!(x.is_finite());
    /// ```
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple independent draws
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::InvGamma;
    /// use distcan::traits::Sampleable;
    ///
    /// let ig = InvGamma::new(3.0, 2.0).unwrap();
    /// let mut rng = rand::thread_rng();
    /// let xs: Vec<f64> = ig.sample(22, &mut rng);
    /// assert_eq!(xs.len(), 22);
    /// ```
    fn sample<R: Rng>(&self, n: usize, mut rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(&mut rng)).collect()
    }

    /// Endless iterator of draws
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::Sampleable;
    ///
    /// let g = Gaussian::standard();
    /// let mut rng = rand::thread_rng();
    /// let xs: Vec<f64> = g.sample_stream(&mut rng).take(5).collect();
    /// assert_eq!(xs.len(), 5);
    /// ```
    fn sample_stream<'r, R: Rng>(
        &'r self,
        mut rng: &'r mut R,
    ) -> Box<dyn Iterator<Item = X> + 'r> {
        Box::new(std::iter::repeat_with(move || self.draw(&mut rng)))
    }
}

/// A random variable with a density that can be sampled
pub trait Rv<X>: HasDensity<X> + Sampleable<X> {}

impl<X, T> Rv<X> for T where T: HasDensity<X> + Sampleable<X> {}

/// Identifies the support of the distribution
pub trait Support<X> {
    /// Returns `true` if `x` is in the support of the distribution
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gamma;
    /// use distcan::traits::Support;
    ///
    /// let gam = Gamma::new(1.0, 2.0).unwrap();
    ///
    /// assert!(gam.supports(&1.0_f64));
    /// assert!(!gam.supports(&-1.0_f64));
    /// assert!(!gam.supports(&f64::INFINITY));
    /// ```
    fn supports(&self, x: &X) -> bool;
}

/// Continuous probability distribution
pub trait ContinuousDistr<X>: HasDensity<X> + Support<X> {
    /// The value of the Probability Density Function (PDF) at `x`
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::ContinuousDistr;
    ///
    /// let g = Gaussian::standard();
    /// assert!((g.pdf(&0.0_f64) - 0.398_942_280_401_432_7).abs() < 1E-12);
    /// ```
    fn pdf(&self, x: &X) -> f64 {
        self.f(x)
    }

    /// The value of the log Probability Density Function (PDF) at `x`
    fn ln_pdf(&self, x: &X) -> f64 {
        self.ln_f(x)
    }

    /// The PDF evaluated at each of `xs`
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Uniform;
    /// use distcan::traits::ContinuousDistr;
    ///
    /// let u = Uniform::new(0.0, 4.0).unwrap();
    /// let xs: &[f64] = &[1.0, 2.0, 5.0];
    /// assert_eq!(u.pdfs(xs), vec![0.25, 0.25, 0.0]);
    /// ```
    fn pdfs(&self, xs: &[X]) -> Vec<f64> {
        xs.iter().map(|x| self.pdf(x)).collect()
    }

    /// The log PDF evaluated at each of `xs`
    fn ln_pdfs(&self, xs: &[X]) -> Vec<f64> {
        xs.iter().map(|x| self.ln_pdf(x)).collect()
    }
}

/// Has a cumulative distribution function (CDF)
pub trait Cdf<X>: HasDensity<X> {
    /// The value of the Cumulative Density Function at `x`
    ///
    /// # Example
    ///
    /// The proportion of probability in (-∞, μ) in N(μ, σ) is 50%
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::Cdf;
    ///
    /// let g = Gaussian::new(1.0, 1.5).unwrap();
    ///
    /// assert!((g.cdf(&1.0_f64) - 0.5).abs() < 1E-12);
    /// ```
    fn cdf(&self, x: &X) -> f64;

    /// Log of the CDF
    fn ln_cdf(&self, x: &X) -> f64 {
        self.cdf(x).ln()
    }

    /// Survival function, `1 - CDF(x)`
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::Cdf;
    ///
    /// let g = Gaussian::new(1.0, 1.5).unwrap();
    ///
    /// let cdf = g.cdf(&2.0_f64);
    /// let sf = g.sf(&2.0_f64);
    /// assert!((cdf + sf - 1.0).abs() < 1E-12);
    /// ```
    fn sf(&self, x: &X) -> f64 {
        1.0 - self.cdf(x)
    }
}

/// Has an inverse-CDF / quantile function
pub trait InverseCdf<X>: HasDensity<X> {
    /// The value of the `x` at the given probability in the CDF
    ///
    /// # Panics
    ///
    /// If `p` is not in [0, 1]
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::InverseCdf;
    ///
    /// let g = Gaussian::standard();
    /// let x: f64 = g.invcdf(0.5);
    /// assert!(x.abs() < 1E-12);
    /// ```
    fn invcdf(&self, p: f64) -> X;

    /// Alias for `invcdf`
    fn quantile(&self, p: f64) -> X {
        self.invcdf(p)
    }

    /// Interval containing `p` proportion for the probability
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::InverseCdf;
    ///
    /// let g = Gaussian::standard();
    /// let (a, b): (f64, f64) = g.interval(0.68268949213708585);
    /// assert!((a + 1.0).abs() < 1E-8);
    /// assert!((b - 1.0).abs() < 1E-8);
    /// ```
    fn interval(&self, p: f64) -> (X, X) {
        let pt = (1.0 - p) / 2.0;
        (self.quantile(pt), self.quantile(p + pt))
    }
}

/// Defines the distribution mean
pub trait Mean<X> {
    /// Returns `None` if the mean is undefined
    fn mean(&self) -> Option<X>;
}

/// Defines the distribution median
pub trait Median<X> {
    /// Returns `None` if the median is undefined
    fn median(&self) -> Option<X>;
}

/// Defines the distribution mode
pub trait Mode<X> {
    /// Returns `None` if the mode is undefined or is not a single value
    fn mode(&self) -> Option<X>;
}

/// Defines the distribution variance
pub trait Variance<X> {
    /// Returns `None` if the variance is undefined
    fn variance(&self) -> Option<X>;
}

/// Standard deviation, the square root of the variance
pub trait StandardDeviation: Variance<f64> {
    /// # Example
    ///
    /// ```
    /// use distcan::dist::Gaussian;
    /// use distcan::traits::StandardDeviation;
    ///
    /// let g = Gaussian::new(0.0, 2.5).unwrap();
    /// assert!((g.std().unwrap() - 2.5).abs() < 1E-12);
    /// ```
    fn std(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}

impl<T: Variance<f64>> StandardDeviation for T {}

/// Defines the differential entropy of the distribution
pub trait Entropy {
    fn entropy(&self) -> f64;
}

/// Defines the skewness of the distribution
pub trait Skewness {
    fn skewness(&self) -> Option<f64>;
}

/// Defines the excess kurtosis of the distribution
pub trait Kurtosis {
    /// Excess kurtosis; zero for the Gaussian
    fn kurtosis(&self) -> Option<f64>;

    /// Thinner tails than the Gaussian (negative excess kurtosis)
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::{Gaussian, Uniform};
    /// use distcan::traits::Kurtosis;
    ///
    /// assert_eq!(Uniform::new(0.0, 1.0).unwrap().is_platykurtic(), Some(true));
    /// assert_eq!(Gaussian::standard().is_platykurtic(), Some(false));
    /// ```
    fn is_platykurtic(&self) -> Option<bool> {
        self.kurtosis().map(|k| k < 0.0)
    }

    /// Fatter tails than the Gaussian (positive excess kurtosis)
    fn is_leptokurtic(&self) -> Option<bool> {
        self.kurtosis().map(|k| k > 0.0)
    }

    /// Same tail weight as the Gaussian (zero excess kurtosis)
    fn is_mesokurtic(&self) -> Option<bool> {
        self.kurtosis().map(|k| k == 0.0)
    }
}

/// Is a [sufficient statistic](https://en.wikipedia.org/wiki/Sufficient_statistic)
/// for a distribution.
///
/// # Example
///
/// ```
/// use distcan::data::GaussianSuffStat;
/// use distcan::traits::SuffStat;
///
/// let mut stat = GaussianSuffStat::new();
/// let xs: &[f64] = &[1.0, 2.0, 3.0];
/// stat.observe_many(xs);
/// assert_eq!(stat.n(), 3);
///
/// stat.forget(&2.0_f64);
/// assert_eq!(stat.n(), 2);
/// assert_eq!(stat.sum_x(), 4.0);
/// ```
pub trait SuffStat<X> {
    /// Returns the number of observations
    fn n(&self) -> usize;

    /// Assimilate the datum `x` into the statistic
    fn observe(&mut self, x: &X);

    /// Remove the datum `x` from the statistic
    fn forget(&mut self, x: &X);

    /// Assimilate several observations
    fn observe_many(&mut self, xs: &[X]) {
        xs.iter().for_each(|x| self.observe(x));
    }

    /// Forget several observations
    fn forget_many(&mut self, xs: &[X]) {
        xs.iter().for_each(|x| self.forget(x));
    }
}
