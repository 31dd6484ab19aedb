/// Survival function of the asymptotic Kolmogorov distribution, P(K > x)
fn kolmogorov_sf(x: f64) -> f64 {
    if x < 0.2 {
        return 1.0;
    }

    let x2 = x * x;
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = f64::from(k);
        let term = sign * (-2.0 * kf * kf * x2).exp();
        sum += term;
        if term.abs() < 1E-16 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

/// Univariate one-sample [Kolmogorov-Smirnov](https://en.wikipedia.org/wiki/Kolmogorov%E2%80%93Smirnov_test)
/// test.
///
/// Given a set of samples, `xs`, and a distribution `F`, the KS test
/// determines whether `xs` were generated by `F`. Returns the statistic, D,
/// and the asymptotic p-value.
///
/// # Example
///
/// ```rust
/// use distcan::misc::ks_test;
/// use distcan::dist::Gaussian;
/// use distcan::traits::Cdf;
///
/// let gauss = Gaussian::standard();
/// let cdf = |x: f64| gauss.cdf(&x);
///
/// // Uniform draws on (0, 1) are clearly not standard normal
/// let xs: Vec<f64> = (1..=100).map(|i| f64::from(i) / 101.0).collect();
/// let (_stat, p) = ks_test(&xs, cdf);
///
/// assert!(p < 0.05);
/// ```
pub fn ks_test<F>(xs: &[f64], cdf: F) -> (f64, f64)
where
    F: Fn(f64) -> f64,
{
    let mut xs_r: Vec<f64> = xs.to_vec();
    xs_r.sort_unstable_by(|a, b| a.total_cmp(b));

    let n = xs_r.len() as f64;
    let stat = xs_r.iter().enumerate().fold(0.0_f64, |acc, (i, &x)| {
        let f = cdf(x);
        let lower = f - (i as f64) / n;
        let upper = (i as f64 + 1.0) / n - f;
        acc.max(lower).max(upper)
    });

    let sqrt_n = n.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * stat;
    (stat, kolmogorov_sf(lambda))
}
