//! Root finding methods.
//!
//! Used to invert CDFs that have no closed-form quantile function.
use log::debug;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFindingError {
    /// The maximum number of iterations was reached before converging
    MaxIterationReached,
    /// The derivative vanished so the next step is undefined
    NumericalDivergence,
    /// The function does not change sign on the given interval
    InvalidBracket,
}

impl std::error::Error for RootFindingError {}

impl fmt::Display for RootFindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxIterationReached => {
                write!(f, "maximum number of iterations reached")
            }
            Self::NumericalDivergence => {
                write!(f, "derivative too close to zero")
            }
            Self::InvalidBracket => {
                write!(f, "function does not change sign on the interval")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RootFindingError>;

/// Newton-Raphson root finding algorithm.
///
/// `f` returns the function value and its derivative at `x`.
///
/// # Example
///
/// ```rust
/// use distcan::misc::root_finding::newton_raphson;
///
/// // root of x^2 - 2
/// let fg = |x: f64| (x * x - 2.0, 2.0 * x);
/// let x = newton_raphson(1.0, 1E-12, 100, fg).unwrap();
/// assert!((x - 2.0_f64.sqrt()).abs() < 1E-12);
/// ```
pub fn newton_raphson<F>(x0: f64, tol: f64, max_iter: usize, f: F) -> Result<f64>
where
    F: Fn(f64) -> (f64, f64),
{
    let mut x = x0;

    for _ in 0..max_iter {
        let (f_x, g_x) = f(x);
        if g_x.abs() < f64::EPSILON || !g_x.is_finite() {
            return Err(RootFindingError::NumericalDivergence);
        }

        let x_prev = x;
        x -= f_x / g_x;

        if (x - x_prev).abs() <= tol * x_prev.abs().max(1.0) {
            return Ok(x);
        }
    }

    Err(RootFindingError::MaxIterationReached)
}

/// Bisection on the interval `[a, b]`.
///
/// # Example
///
/// ```rust
/// use distcan::misc::root_finding::bisection;
///
/// let x = bisection(0.0, 2.0, 1E-12, 200, |x: f64| x * x - 2.0).unwrap();
/// assert!((x - 2.0_f64.sqrt()).abs() < 1E-11);
///
/// // no sign change
/// assert!(bisection(2.0, 3.0, 1E-12, 200, |x: f64| x * x - 2.0).is_err());
/// ```
pub fn bisection<F>(
    mut a: f64,
    mut b: f64,
    tol: f64,
    max_iter: usize,
    f: F,
) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let mut f_a = f(a);
    let f_b = f(b);

    if f_a == 0.0 {
        return Ok(a);
    } else if f_b == 0.0 {
        return Ok(b);
    } else if f_a.signum() == f_b.signum() {
        return Err(RootFindingError::InvalidBracket);
    }

    for _ in 0..max_iter {
        let mid = a + (b - a) / 2.0;
        let f_mid = f(mid);

        if f_mid == 0.0 || (b - a).abs() <= tol * mid.abs().max(1.0) {
            return Ok(mid);
        }

        if f_mid.signum() == f_a.signum() {
            a = mid;
            f_a = f_mid;
        } else {
            b = mid;
        }
    }

    Err(RootFindingError::MaxIterationReached)
}

const INVERT_TOL: f64 = 1E-14;
const NEWTON_MAX_ITER: usize = 100;
const BISECTION_MAX_ITER: usize = 2_000;

/// Find `x` such that `cdf(x) = p` on the support `[lower, upper]`.
///
/// Either bound may be infinite. Newton-Raphson is tried first from `x0` using
/// the density as derivative; if it fails or wanders outside the support the
/// root is found by bisection on a bracket grown outward from `x0`.
///
/// # Example
///
/// ```rust
/// use distcan::misc::root_finding::invert_cdf;
///
/// // Exponential(1)
/// let cdf = |x: f64| 1.0 - (-x).exp();
/// let pdf = |x: f64| (-x).exp();
///
/// let x = invert_cdf(0.5, 1.0, (0.0, f64::INFINITY), cdf, pdf);
/// assert!((x - 2.0_f64.ln()).abs() < 1E-10);
/// ```
pub fn invert_cdf<C, P>(
    p: f64,
    x0: f64,
    (lower, upper): (f64, f64),
    cdf: C,
    pdf: P,
) -> f64
where
    C: Fn(f64) -> f64,
    P: Fn(f64) -> f64,
{
    if p <= 0.0 {
        return lower;
    } else if p >= 1.0 {
        return upper;
    }

    let in_support = |x: f64| x.is_finite() && x >= lower && x <= upper;

    match newton_raphson(x0, INVERT_TOL, NEWTON_MAX_ITER, |x| {
        (cdf(x) - p, pdf(x))
    }) {
        Ok(x) if in_support(x) && (cdf(x) - p).abs() < 1E-10 => return x,
        Ok(x) => debug!("invert_cdf: newton left support or stalled at {}", x),
        Err(err) => debug!("invert_cdf: newton failed ({}), bisecting", err),
    }

    let (a, b) = grow_bracket(p, x0, (lower, upper), &cdf);
    bisection(a, b, INVERT_TOL, BISECTION_MAX_ITER, |x| cdf(x) - p)
        .unwrap_or_else(|err| {
            debug!("invert_cdf: bisection failed ({}) on [{}, {}]", err, a, b);
            a + (b - a) / 2.0
        })
}

// Expand outward from x0 until cdf(a) <= p <= cdf(b), stopping at the support
// bounds.
fn grow_bracket<C>(
    p: f64,
    x0: f64,
    (lower, upper): (f64, f64),
    cdf: &C,
) -> (f64, f64)
where
    C: Fn(f64) -> f64,
{
    let mut a = x0;
    let mut b = x0;
    let mut step = x0.abs().max(1.0);

    while cdf(a) > p && a > lower {
        a = (a - step).max(lower);
        step *= 2.0;
        if !a.is_finite() {
            break;
        }
    }

    step = x0.abs().max(1.0);
    while cdf(b) < p && b < upper {
        b = (b + step).min(upper);
        step *= 2.0;
        if !b.is_finite() {
            break;
        }
    }

    (a, b)
}
