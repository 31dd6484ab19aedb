use special::Gamma as _;

/// Gamma function, Γ(x)
///
/// # Example
///
/// ```rust
/// use distcan::misc::gammafn;
///
/// assert!((gammafn(5.0) - 24.0).abs() < 1E-10);
/// ```
#[inline]
pub fn gammafn(x: f64) -> f64 {
    x.gamma()
}

/// Natural logarithm of the gamma function, ln Γ(x)
///
/// # Example
///
/// ```rust
/// use distcan::misc::ln_gammafn;
///
/// assert!((ln_gammafn(5.0) - 24.0_f64.ln()).abs() < 1E-12);
/// ```
#[inline]
pub fn ln_gammafn(x: f64) -> f64 {
    x.ln_gamma().0
}
